use crate::models::api_response::ApiResponse;
use crate::services::apod_service::ApodError;
use log::{debug, warn};
use reqwest::Client;

/// Downloads the picture behind a record so it can be rendered locally.
pub async fn fetch_media(client: &Client, url: &str) -> ApiResponse<Vec<u8>> {
    match download(client, url).await {
        Ok(bytes) => {
            debug!("Downloaded {} bytes from {}", bytes.len(), url);
            ApiResponse::ok(bytes)
        }
        Err(err) => {
            warn!("Failed to download {}: {}", url, err);
            ApiResponse::err(err.to_string())
        }
    }
}

async fn download(client: &Client, url: &str) -> Result<Vec<u8>, ApodError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApodError::Status(status));
    }

    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_body_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/image/galaxy.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;

        let url = format!("{}/image/galaxy.jpg", server.uri());
        let response = fetch_media(&Client::new(), &url).await;

        assert_eq!(response.data(), Some(&vec![1u8, 2, 3]));
    }

    #[tokio::test]
    async fn status_errors_use_the_same_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let response = fetch_media(&Client::new(), &server.uri()).await;

        assert_eq!(response.error(), Some("HTTP error! status: 503"));
    }
}
