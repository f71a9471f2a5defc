//! JSON bodies and errors for `POST /api/classify`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spamsentry_ai::InferenceError;
use spamsentry_core::{Label, Message, Verdict};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// Missing, `null` and blank messages are all treated as no input.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub label: Label,
    pub code: i64,
    pub headline: String,
    pub spam_probability: Option<f32>,
    pub classified_at: DateTime<Utc>,
}

impl From<Verdict> for ClassifyResponse {
    fn from(verdict: Verdict) -> Self {
        Self {
            label: verdict.label,
            code: verdict.label.code(),
            headline: verdict.headline().to_string(),
            spam_probability: verdict.spam_probability,
            classified_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", Message::NO_INPUT)]
    NoInput,
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NoInput => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidBody(rejection) => rejection.status(),
            Self::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
