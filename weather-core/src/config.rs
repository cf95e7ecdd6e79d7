use std::{fmt, time::Duration};

use crate::error::{Result, WeatherError};

/// Environment variable holding the Visual Crossing API key.
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Optional override of the timeline endpoint, e.g. to point at a test server.
pub const BASE_URL_VAR: &str = "WEATHER_API_BASE_URL";

pub const DEFAULT_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime configuration, read once from the environment.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Config with the given credential and default endpoint/timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Load config from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                WeatherError::Configuration(format!(
                    "{API_KEY_VAR} environment variable is not set.\n\
                     Hint: export {API_KEY_VAR}=<your Visual Crossing API key>."
                ))
            })?;

        let mut cfg = Self::new(api_key.trim());

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            cfg.base_url = base_url.trim().to_string();
        }

        Ok(cfg)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
