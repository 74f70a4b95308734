//! HTTP client for a running registry server.
//!
//! Used by the CLI's remote commands. The base URL comes from `--url` or the
//! `REGISTRY_URL` environment variable (default: `http://localhost:5000`).

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::DEFAULT_URL;
use crate::models::*;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
    client: Client,
}

impl RegistryClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("REGISTRY_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/api{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Handle response, converting HTTP errors to ClientError.
    ///
    /// Error bodies use the `{success, message}` envelope; the message is
    /// surfaced when present, otherwise the raw body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiResponse>(&body)
            .map(|envelope| envelope.message)
            .unwrap_or(body);
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
            StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(message)),
            _ => Err(ClientError::Server(format!("{}: {}", status, message))),
        }
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self.request(reqwest::Method::GET, "/health").send().await?;
        self.handle_response(response).await
    }

    pub async fn list_gifts(&self) -> Result<Vec<Gift>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/presentes")
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn list_people(&self) -> Result<Vec<Person>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/pessoas").send().await?;
        self.handle_response(response).await
    }

    /// Reserve a gift. A gift someone else already holds comes back as
    /// `Ok` with `success == false`.
    pub async fn reserve(&self, gift_id: &str, guest: &str) -> Result<ApiResponse, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/reservar")
            .json(&ReserveInput::new(gift_id, guest))
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn cancel(&self, gift_id: &str, guest: &str) -> Result<ApiResponse, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/cancelar-reserva")
            .json(&CancelInput::new(guest, gift_id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn summary(&self, guest: &str) -> Result<GuestSummary, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/resumo")
            .query(&[("nome", guest)])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
