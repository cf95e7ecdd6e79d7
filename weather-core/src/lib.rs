//! Core library for the `weathercli` tool.
//!
//! This crate defines:
//! - Configuration & credential loading from the environment
//! - The error taxonomy shared by every stage
//! - Shared domain models (records, observation window, location)
//! - Abstraction over weather providers and the Visual Crossing client
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::WeatherError;
pub use model::{Location, ObservationWindow, WeatherRecord, WeatherRequest, parse_date};
pub use provider::{VisualCrossingProvider, WeatherProvider, provider_from_config};
