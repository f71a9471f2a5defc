//! Request handlers for the form pages and the JSON API.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Html;
use axum::{Form, Json};
use serde::Deserialize;
use spamsentry_core::{Message, ModelReport};
use tracing::{error, info, warn};

use crate::api::{ApiError, ClassifyRequest, ClassifyResponse};
use crate::page::{self, Outcome, Variant};
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    message: String,
}

pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn index() -> Html<String> {
    render_blank(Variant::Standard)
}

pub async fn submit(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Html<String> {
    render_submission(&state, Variant::Standard, form.message).await
}

pub async fn insights() -> Html<String> {
    render_blank(Variant::Insights)
}

pub async fn submit_insights(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Html<String> {
    render_submission(&state, Variant::Insights, form.message).await
}

pub async fn classify(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(error = %rejection, "rejected api body");
        ApiError::from(rejection)
    })?;
    let message = Message::new(req.message.unwrap_or_default()).ok_or(ApiError::NoInput)?;
    let verdict = state.service.verdict(&message).map_err(|e| {
        error!(error = %e, "api classification failed");
        ApiError::from(e)
    })?;
    info!(label = %verdict.label, bytes = message.len(), "api classified message");
    Ok(Json(ClassifyResponse::from(verdict)))
}

fn render_blank(variant: Variant) -> Html<String> {
    Html(page::render(variant, "", &Outcome::Blank, &ModelReport::DEMO))
}

async fn render_submission(state: &AppState, variant: Variant, raw: String) -> Html<String> {
    let outcome = analyze(state, &raw).await;
    Html(page::render(variant, &raw, &outcome, &ModelReport::DEMO))
}

/// Classify a form submission, applying the cosmetic delay for real input only.
async fn analyze(state: &AppState, raw: &str) -> Outcome {
    let Some(message) = Message::new(raw) else {
        warn!("submission without text");
        return Outcome::NoInput;
    };

    let delay = state.options.analyze_delay;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match state.service.verdict(&message) {
        Ok(verdict) => {
            info!(label = %verdict.label, bytes = message.len(), "classified submission");
            Outcome::Verdict(verdict)
        }
        Err(e) => {
            error!(error = %e, "classification failed");
            Outcome::Failed(e.to_string())
        }
    }
}
