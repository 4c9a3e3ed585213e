use crate::config::ApiConfig;
use crate::models::api_response::ApiResponse;
use crate::models::apod::ApodImage;
use crate::services::{apod_service, media_service};
use iced::futures::FutureExt;
use iced::futures::future::BoxFuture;
use reqwest::Client;

/// Where the viewer gets its records and pictures from.
pub trait ApodSource: Send + Sync {
    fn fetch_apod(&self, date: String) -> BoxFuture<'static, ApiResponse<ApodImage>>;

    fn fetch_media(&self, url: String) -> BoxFuture<'static, ApiResponse<Vec<u8>>>;
}

/// The real NASA endpoint.
#[derive(Debug, Clone)]
pub struct NasaApod {
    client: Client,
    config: ApiConfig,
}

impl NasaApod {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl ApodSource for NasaApod {
    fn fetch_apod(&self, date: String) -> BoxFuture<'static, ApiResponse<ApodImage>> {
        let client = self.client.clone();
        let config = self.config.clone();
        async move { apod_service::fetch_apod(&client, &config, Some(&date)).await }.boxed()
    }

    fn fetch_media(&self, url: String) -> BoxFuture<'static, ApiResponse<Vec<u8>>> {
        let client = self.client.clone();
        async move { media_service::fetch_media(&client, &url).await }.boxed()
    }
}
