//! Visual Crossing client behavior against a local mock server.

use std::time::Duration;

use weather_core::{
    Config, Location, VisualCrossingProvider, WeatherProvider, WeatherRequest, parse_date,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const WINDOW_PATH: &str = "/timeline/36.1627,-86.7816/2024-03-15/2024-03-21";

fn sample_response() -> serde_json::Value {
    serde_json::json!({
        "queryCost": 7,
        "latitude": 36.1627,
        "longitude": -86.7816,
        "resolvedAddress": "36.1627,-86.7816",
        "timezone": "America/Chicago",
        "days": [
            {
                "datetime": "2024-03-15",
                "tempmax": 78.1, "tempmin": 55.4,
                "feelslikemax": 78.1, "feelslikemin": 55.4,
                "precip": 0.0, "preciptype": null,
                "windgust": 21.9, "windspeed": 12.3, "cloudcover": 40.2,
                "conditions": "Partially cloudy"
            },
            {
                "datetime": "2024-03-16",
                "tempmax": 66.0, "tempmin": 50.1,
                "feelslikemax": 66.0, "feelslikemin": 50.1,
                "precip": 0.71, "preciptype": ["rain", "snow"],
                "windgust": 30.0, "windspeed": 15.0, "cloudcover": 98.0,
                "conditions": "Rain, Overcast"
            }
        ]
    })
}

fn provider_for(server: &MockServer) -> VisualCrossingProvider {
    let mut cfg = Config::new("TEST_KEY");
    cfg.base_url = format!("{}/timeline", server.uri());
    cfg.timeout = Duration::from_secs(2);
    VisualCrossingProvider::new(&cfg).expect("provider should build")
}

fn request() -> WeatherRequest {
    WeatherRequest::new(Location::default(), parse_date("2024-03-15").unwrap()).unwrap()
}

#[tokio::test]
async fn fetch_success_returns_records_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WINDOW_PATH))
        .and(query_param("key", "TEST_KEY"))
        .and(query_param("include", "days"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(1)
        .mount(&server)
        .await;

    let records = provider_for(&server).fetch(&request()).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date.to_string(), "2024-03-15");
    assert_eq!(records[0].precip_type, "None");
    assert_eq!(records[1].date.to_string(), "2024-03-16");
    assert_eq!(records[1].precip_type, "rain,snow");
    assert_eq!(records[1].conditions, "Rain, Overcast");
}

#[tokio::test]
async fn fetch_skips_malformed_day_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WINDOW_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "days": [
                { "datetime": "March 15", "tempmax": 1.0 },
                { "datetime": "2024-03-16", "tempmax": 2.0 }
            ]
        })))
        .mount(&server)
        .await;

    let records = provider_for(&server).fetch(&request()).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date.to_string(), "2024-03-16");
}

#[tokio::test]
async fn fetch_without_days_is_empty_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WINDOW_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "queryCost": 0 })))
        .mount(&server)
        .await;

    let records = provider_for(&server).fetch(&request()).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn non_success_status_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("No account found with API key 'TEST_KEY'"))
        .mount(&server)
        .await;

    let err = provider_for(&server).fetch(&request()).await.unwrap_err();

    assert!(err.is_network());
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn invalid_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server).fetch(&request()).await.unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn wrong_shape_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "days": "soon" })))
        .mount(&server)
        .await;

    let err = provider_for(&server).fetch(&request()).await.unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn slow_response_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_response())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut cfg = Config::new("TEST_KEY");
    cfg.base_url = format!("{}/timeline", server.uri());
    cfg.timeout = Duration::from_millis(50);
    let provider = VisualCrossingProvider::new(&cfg).unwrap();

    let err = provider.fetch(&request()).await.unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn null_days_and_null_dates_are_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WINDOW_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "days": [
                { "datetime": null, "tempmax": 1.0 },
                { "datetime": "2024-03-16", "tempmax": 2.0 }
            ]
        })))
        .mount(&server)
        .await;

    let records = provider_for(&server).fetch(&request()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date.to_string(), "2024-03-16");

    server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "days": null })))
        .mount(&server)
        .await;

    let records = provider_for(&server).fetch(&request()).await.unwrap();
    assert!(records.is_empty());
}
