use crate::{Config, WeatherRecord, WeatherRequest, error::Result};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod visualcrossing;

pub use visualcrossing::VisualCrossingProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Daily records for the request's window, in the source's day order.
    async fn fetch(&self, request: &WeatherRequest) -> Result<Vec<WeatherRecord>>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>> {
    Ok(Box::new(VisualCrossingProvider::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_builds_visual_crossing() {
        let cfg = Config::new("KEY");
        let provider = provider_from_config(&cfg).expect("provider should build");

        assert!(format!("{provider:?}").contains("VisualCrossingProvider"));
    }
}
