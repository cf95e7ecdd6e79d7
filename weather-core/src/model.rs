use std::{fmt, str::FromStr};

use chrono::{Days, NaiveDate};
use crate::error::{Result, WeatherError};

/// Calendar-date layout used on the command line and in API responses.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of days covered by one request, start day included.
pub const WINDOW_DAYS: u64 = 7;

/// Nashville, TN. Queried when no location is given.
pub const DEFAULT_LOCATION: Location = Location::Coordinates {
    latitude: 36.1627,
    longitude: -86.7816,
};

/// Parse a strict, zero-padded `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let invalid = || {
        WeatherError::Input(format!(
            "Invalid date '{input}'. Please use YYYY-MM-DD format."
        ))
    };

    let date = NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())?;

    // chrono tolerates padding spaces, signs and unpadded fields; only the
    // canonical spelling of the date is accepted.
    if date.format(DATE_FORMAT).to_string() != input {
        return Err(invalid());
    }

    Ok(date)
}

/// One day of observations, as rendered in a single table row.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub feels_like_max: f64,
    pub feels_like_min: f64,
    pub precip: f64,
    /// Comma-joined precipitation types, or `"None"`.
    pub precip_type: String,
    pub wind_gust: f64,
    pub wind_speed: f64,
    pub cloud_cover: f64,
    pub conditions: String,
}

/// The inclusive 7-day range queried per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ObservationWindow {
    pub fn starting(start: NaiveDate) -> Result<Self> {
        let end = start.checked_add_days(Days::new(WINDOW_DAYS - 1)).ok_or_else(|| {
            WeatherError::Input(format!(
                "A {WINDOW_DAYS}-day window starting at {start} runs past the supported calendar."
            ))
        })?;

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Where to ask for weather: a coordinate pair or a place name.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Coordinates { latitude: f64, longitude: f64 },
    Named(String),
}

impl Default for Location {
    fn default() -> Self {
        DEFAULT_LOCATION
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Coordinates {
                latitude,
                longitude,
            } => write!(f, "{latitude},{longitude}"),
            Location::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for Location {
    type Err = WeatherError;

    /// `"lat,lon"` becomes coordinates; anything else is taken as a place name.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::Input("Location cannot be empty.".to_string()));
        }

        let coords = trimmed.split_once(',').and_then(|(lat, lon)| {
            let latitude = lat.trim().parse::<f64>().ok()?;
            let longitude = lon.trim().parse::<f64>().ok()?;
            Some((latitude, longitude))
        });

        match coords {
            Some((latitude, longitude)) => {
                if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
                    return Err(WeatherError::Input(format!(
                        "Invalid coordinates '{trimmed}': latitude must be -90 to 90, longitude must be -180 to 180."
                    )));
                }
                Ok(Location::Coordinates {
                    latitude,
                    longitude,
                })
            }
            None => Ok(Location::Named(trimmed.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub location: Location,
    pub window: ObservationWindow,
}

impl WeatherRequest {
    pub fn new(location: Location, start: NaiveDate) -> Result<Self> {
        Ok(Self {
            location,
            window: ObservationWindow::starting(start)?,
        })
    }
}
