//! HTTP client for a running SpamSentry server's JSON API.

use thiserror::Error;
use tracing::info;

use crate::api::{ClassifyRequest, ClassifyResponse, ErrorBody};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
}

/// Client for `POST /api/classify`.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given server base URL.
    ///
    /// `base_url` should be like `http://localhost:8501` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ask the server to classify `message`.
    ///
    /// Blank messages come back as a `422` [`ClientError::Server`].
    pub async fn classify(&self, message: &str) -> Result<ClassifyResponse, ClientError> {
        let url = format!("{}/api/classify", self.base_url);
        let body = ClassifyRequest {
            message: Some(message.to_string()),
        };

        info!(url = %url, bytes = message.len(), "sending message for classification");
        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: server_message(&text),
            });
        }

        let verdict: ClassifyResponse = resp.json().await?;
        info!(label = %verdict.label, "classification received");
        Ok(verdict)
    }
}

/// Pull `error` out of a JSON error body, falling back to the raw text.
fn server_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string())
}
