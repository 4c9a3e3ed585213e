//! Client for the APOD endpoint.
//!
//! Plain functions taking the HTTP client and the API configuration. Every
//! call returns an [`ApiResponse`]; failures are flattened into a message
//! here and nowhere else.

use crate::config::ApiConfig;
use crate::models::api_response::ApiResponse;
use crate::models::apod::ApodImage;
use log::{error, info};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use thiserror::Error;

pub const APOD_PATH: &str = "/planetary/apod";
pub const DEFAULT_RANDOM_COUNT: u32 = 5;

#[derive(Debug, Error)]
pub enum ApodError {
    #[error("HTTP error! status: {}", .0.as_u16())]
    Status(StatusCode),
    #[error("{0}")]
    Transport(reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

// Request URLs carry the API key, so they never reach the message.
impl From<reqwest::Error> for ApodError {
    fn from(err: reqwest::Error) -> Self {
        ApodError::Transport(err.without_url())
    }
}

/// Picture of the day for `date`, or for today when `date` is `None`.
pub async fn fetch_apod(
    client: &Client,
    config: &ApiConfig,
    date: Option<&str>,
) -> ApiResponse<ApodImage> {
    let mut params = vec![("api_key", config.api_key.clone())];
    if let Some(date) = date.filter(|d| !d.is_empty()) {
        params.push(("date", date.to_string()));
    }

    let result = get_json(client, config, &params).await;
    into_response(config, "APOD", result)
}

/// Every entry between `start_date` and `end_date`, both inclusive.
pub async fn fetch_apod_range(
    client: &Client,
    config: &ApiConfig,
    start_date: &str,
    end_date: &str,
) -> ApiResponse<Vec<ApodImage>> {
    let params = [
        ("api_key", config.api_key.clone()),
        ("start_date", start_date.to_string()),
        ("end_date", end_date.to_string()),
    ];

    let result = get_json(client, config, &params).await;
    into_response(config, "APOD Range", result)
}

pub async fn fetch_random_apod(
    client: &Client,
    config: &ApiConfig,
    count: u32,
) -> ApiResponse<Vec<ApodImage>> {
    let params = [
        ("api_key", config.api_key.clone()),
        ("count", count.to_string()),
    ];

    let result = get_json(client, config, &params).await;
    into_response(config, "Random APOD", result)
}

pub fn endpoint(config: &ApiConfig) -> String {
    format!("{}{}", config.base_url.trim_end_matches('/'), APOD_PATH)
}

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    config: &ApiConfig,
    params: &[(&str, String)],
) -> Result<T, ApodError> {
    let response = client.get(endpoint(config)).query(params).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApodError::Status(status));
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn into_response<T: Debug>(
    config: &ApiConfig,
    label: &str,
    result: Result<T, ApodError>,
) -> ApiResponse<T> {
    let response = match result {
        Ok(data) => ApiResponse::ok(data),
        Err(err) => ApiResponse::err(err.to_string()),
    };

    if config.features.enable_logging {
        if let Some(data) = response.data() {
            info!("{} Data: {:?}", label, data);
        } else if let Some(message) = response.error() {
            error!("{} Fetch Error: {}", label, message);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Features;
    use crate::models::apod::MediaType;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ApiConfig {
        ApiConfig {
            api_key: "test-key".to_string(),
            base_url: server.uri(),
            features: Features {
                enable_logging: false,
                enable_offline_mode: false,
            },
            ..ApiConfig::default()
        }
    }

    fn apod_json(date: &str) -> serde_json::Value {
        json!({
            "date": date,
            "explanation": "Stars.",
            "hdurl": format!("https://apod.nasa.gov/{date}_hd.jpg"),
            "media_type": "image",
            "service_version": "v1",
            "title": format!("Sky on {date}"),
            "url": format!("https://apod.nasa.gov/{date}.jpg")
        })
    }

    #[tokio::test]
    async fn fetches_single_date() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(APOD_PATH))
            .and(query_param("api_key", "test-key"))
            .and(query_param("date", "2024-01-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(apod_json("2024-01-01")))
            .expect(1)
            .mount(&server)
            .await;

        let response = fetch_apod(&Client::new(), &config_for(&server), Some("2024-01-01")).await;

        assert!(response.is_success());
        let image = response.data().unwrap();
        assert_eq!(image.date, "2024-01-01");
        assert_eq!(image.media_type, MediaType::Image);
    }

    #[tokio::test]
    async fn omits_date_when_not_given() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(APOD_PATH))
            .and(query_param_is_missing("date"))
            .respond_with(ResponseTemplate::new(200).set_body_json(apod_json("2024-06-01")))
            .mount(&server)
            .await;

        let response = fetch_apod(&Client::new(), &config_for(&server), None).await;

        assert_eq!(response.data().map(|i| i.date.as_str()), Some("2024-06-01"));
    }

    #[tokio::test]
    async fn non_success_status_becomes_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(APOD_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let response = fetch_apod(&Client::new(), &config_for(&server), Some("1990-01-01")).await;

        assert!(!response.is_success());
        assert_eq!(response.data(), None);
        assert_eq!(response.error(), Some("HTTP error! status: 404"));
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(APOD_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"date\": 5"))
            .mount(&server)
            .await;

        let response = fetch_apod(&Client::new(), &config_for(&server), None).await;

        assert!(!response.is_success());
        assert!(!response.error().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_is_reported() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ApiConfig::default()
        };

        let response = fetch_apod(&Client::new(), &config, None).await;

        assert!(!response.is_success());
        assert!(!response.error().unwrap().is_empty());
    }

    #[tokio::test]
    async fn transport_errors_do_not_expose_the_api_key() {
        let config = ApiConfig {
            api_key: "SUPER-SECRET-KEY".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            ..ApiConfig::default()
        };

        let response = fetch_apod(&Client::new(), &config, Some("2024-01-01")).await;

        let message = response.error().unwrap();
        assert!(!message.is_empty());
        assert!(!message.contains("SUPER-SECRET-KEY"), "{message}");
        assert!(!message.contains("api_key"), "{message}");
    }

    #[tokio::test]
    async fn decode_errors_do_not_expose_the_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(APOD_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;
        let config = ApiConfig {
            api_key: "SUPER-SECRET-KEY".to_string(),
            ..config_for(&server)
        };

        let response = fetch_apod(&Client::new(), &config, None).await;

        assert!(!response.error().unwrap().contains("SUPER-SECRET-KEY"));
    }

    #[tokio::test]
    async fn fetches_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(APOD_PATH))
            .and(query_param("start_date", "2024-01-01"))
            .and(query_param("end_date", "2024-01-02"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([apod_json("2024-01-01"), apod_json("2024-01-02")])),
            )
            .mount(&server)
            .await;

        let response =
            fetch_apod_range(&Client::new(), &config_for(&server), "2024-01-01", "2024-01-02")
                .await;

        let dates: Vec<_> = response
            .data()
            .unwrap()
            .iter()
            .map(|i| i.date.clone())
            .collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-02"]);
    }

    #[tokio::test]
    async fn fetches_random_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(APOD_PATH))
            .and(query_param("count", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                apod_json("2001-01-01"),
                apod_json("2002-02-02"),
                apod_json("2003-03-03"),
                apod_json("2004-04-04"),
                apod_json("2005-05-05")
            ])))
            .mount(&server)
            .await;

        let response =
            fetch_random_apod(&Client::new(), &config_for(&server), DEFAULT_RANDOM_COUNT).await;

        assert_eq!(response.data().map(Vec::len), Some(5));
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let config = ApiConfig {
            base_url: "https://api.nasa.gov/".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(endpoint(&config), "https://api.nasa.gov/planetary/apod");
    }
}
