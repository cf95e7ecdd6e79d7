use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

use crate::{
    Config,
    error::{Result, WeatherError},
    model::{DATE_FORMAT, WeatherRecord, WeatherRequest, parse_date},
};

use super::WeatherProvider;

/// Fields requested from the timeline API; everything a table row needs.
const ELEMENTS: &str = "datetime,tempmax,tempmin,feelslikemax,feelslikemin,precip,preciptype,\
                        windgust,windspeed,cloudcover,conditions";

/// Substituted when a day carries no precipitation types.
pub const NO_PRECIP_TYPE: &str = "None";

/// Client for the Visual Crossing timeline API.
#[derive(Clone)]
pub struct VisualCrossingProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl VisualCrossingProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WeatherError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            http,
        })
    }

    /// `{base}/{location}/{start}/{end}`; the credential is added as a query
    /// parameter at send time and never appears here.
    pub fn request_url(&self, request: &WeatherRequest) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            WeatherError::Configuration(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;

        let location = request.location.to_string();
        let start = request.window.start().format(DATE_FORMAT).to_string();
        let end = request.window.end().format(DATE_FORMAT).to_string();

        url.path_segments_mut()
            .map_err(|_| {
                WeatherError::Configuration(format!(
                    "Base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(&location)
            .push(&start)
            .push(&end);

        Ok(url)
    }
}

impl fmt::Debug for VisualCrossingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisualCrossingProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WeatherProvider for VisualCrossingProvider {
    #[instrument(skip(self, request), fields(location = %request.location, start = %request.window.start()))]
    async fn fetch(&self, request: &WeatherRequest) -> Result<Vec<WeatherRecord>> {
        let url = self.request_url(request)?;
        debug!(%url, "Requesting daily observations");

        let res = self
            .http
            .get(url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("include", "days"),
                ("elements", ELEMENTS),
            ])
            .send()
            .await
            .map_err(|e| {
                WeatherError::Network(format!("Failed to send request to Visual Crossing: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::Network(format!("Failed to read Visual Crossing response body: {e}"))
        })?;

        if !status.is_success() {
            error!(%status, body = %truncate_body(&body), "Visual Crossing request failed");
            return Err(WeatherError::Network(format!(
                "Visual Crossing request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        debug!(bytes = body.len(), "Received Visual Crossing response");

        let parsed: TimelineResponse = serde_json::from_str(&body)?;
        let records = translate_days(parsed.days.unwrap_or_default());

        debug!(count = records.len(), "Processed days of weather data");
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
pub struct TimelineResponse {
    pub days: Option<Vec<DayObservation>>,
}

/// One element of the response's `days` list. Any field may be absent
/// or `null` for stations that did not report it.
#[derive(Debug, Default, Deserialize)]
pub struct DayObservation {
    pub datetime: Option<String>,
    pub tempmax: Option<f64>,
    pub tempmin: Option<f64>,
    pub feelslikemax: Option<f64>,
    pub feelslikemin: Option<f64>,
    pub precip: Option<f64>,
    pub preciptype: Option<Vec<String>>,
    pub windgust: Option<f64>,
    pub windspeed: Option<f64>,
    pub cloudcover: Option<f64>,
    pub conditions: Option<String>,
}

/// Translate every day, dropping (and logging) those with a bad date.
pub fn translate_days(days: Vec<DayObservation>) -> Vec<WeatherRecord> {
    days.into_iter()
        .filter_map(|day| {
            let raw_date = day.datetime.clone().unwrap_or_default();
            match translate_day(day) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(date = %raw_date, %err, "Skipping day with unparseable date");
                    None
                }
            }
        })
        .collect()
}

/// Map one response day onto a record. Missing numbers become `0.0`,
/// missing conditions become empty, and an absent or empty precipitation
/// type list becomes `"None"`.
pub fn translate_day(day: DayObservation) -> Result<WeatherRecord> {
    let date = parse_date(day.datetime.as_deref().unwrap_or_default())?;

    let precip_type = match day.preciptype {
        Some(types) if !types.is_empty() => types.join(","),
        _ => NO_PRECIP_TYPE.to_string(),
    };

    Ok(WeatherRecord {
        date,
        temp_max: day.tempmax.unwrap_or_default(),
        temp_min: day.tempmin.unwrap_or_default(),
        feels_like_max: day.feelslikemax.unwrap_or_default(),
        feels_like_min: day.feelslikemin.unwrap_or_default(),
        precip: day.precip.unwrap_or_default(),
        precip_type,
        wind_gust: day.windgust.unwrap_or_default(),
        wind_speed: day.windspeed.unwrap_or_default(),
        cloud_cover: day.cloudcover.unwrap_or_default(),
        conditions: day.conditions.unwrap_or_default(),
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
