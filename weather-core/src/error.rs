use thiserror::Error;

/// Every failure the core library can report. All of them end the invocation.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// A user-supplied value (date, location) could not be understood.
    #[error("{0}")]
    Input(String),

    /// Required configuration is missing or unusable.
    #[error("{0}")]
    Configuration(String),

    /// Transport failure, timeout, or non-success HTTP status.
    #[error("{0}")]
    Network(String),

    /// The response body was not the JSON shape we expect.
    #[error("Failed to decode weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WeatherError {
    pub fn is_input(&self) -> bool {
        matches!(self, WeatherError::Input(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, WeatherError::Configuration(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, WeatherError::Network(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, WeatherError::Decode(_))
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
