//! Router, shared state, and server entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use spamsentry_ai::InferenceService;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;

/// Presentation settings for the HTML page.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Pause before showing a result. Purely cosmetic; the JSON API ignores it.
    pub analyze_delay: Duration,
}

/// State shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InferenceService>,
    pub options: Arc<PageOptions>,
}

impl AppState {
    pub fn new(service: Arc<InferenceService>, options: PageOptions) -> Self {
        Self {
            service,
            options: Arc::new(options),
        }
    }
}

/// Build the application router.
///
/// # Routes
///
/// - `GET /` - classification form
/// - `POST /` - classify the `message` form field
/// - `GET /insights` - form plus static report charts
/// - `POST /insights` - classify, with charts
/// - `POST /api/classify` - JSON `{"message": ...}` in, verdict out
/// - `GET /health` - liveness
///
/// Request bodies are not size-limited: messages may be of any length.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route(
            "/insights",
            get(handlers::insights).post(handlers::submit_insights),
        )
        .route("/api/classify", post(handlers::classify))
        .route("/health", get(handlers::health_check))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Where to listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use spamsentry_ai::ArtifactPaths;
    use std::path::PathBuf;
    use tower::ServiceExt;

    const DELAY: Duration = Duration::from_secs(2);

    fn state() -> AppState {
        state_with(PageOptions::default())
    }

    fn state_with(options: PageOptions) -> AppState {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures");
        let service = InferenceService::load(&ArtifactPaths::in_dir(&dir)).unwrap();
        AppState::new(Arc::new(service), options)
    }

    fn delayed() -> AppState {
        state_with(PageOptions {
            analyze_delay: DELAY,
        })
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_post(body: serde_json::Value) -> Request<Body> {
        raw_json_post(body.to_string())
    }

    fn raw_json_post(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/classify")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(req: Request<Body>) -> (StatusCode, String) {
        send_to(state(), req).await
    }

    async fn send_to(state: AppState, req: Request<Body>) -> (StatusCode, String) {
        let resp = create_router(state).oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let req = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn index_renders_form() {
        let req = Request::get("/").body(Body::empty()).unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<form"));
        assert!(!body.contains("<svg"));
    }

    #[tokio::test]
    async fn spam_submission_shows_spam_headline() {
        let (status, body) = send(form_post(
            "/",
            "message=WIN+A+FREE+IPHONE+NOW%21%21%21+CLICK+HERE",
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Spam Detected"));
        assert!(!body.contains("class=\"balloons\""));
    }

    #[tokio::test]
    async fn ham_submission_celebrates() {
        let (_, body) = send(form_post(
            "/",
            "message=Let%27s+meet+for+lunch+tomorrow+at+noon.",
        ))
        .await;
        assert!(body.contains("Ham / Safe Message"));
        assert!(body.contains("class=\"balloons\""));
        // The submitted text is echoed back, escaped.
        assert!(body.contains("Let&#39;s meet for lunch"));
    }

    #[tokio::test]
    async fn blank_submission_warns_without_classifying() {
        let (status, body) = send(form_post("/", "message=+++%0A")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Please enter a message before clicking the button!"));
        assert!(!body.contains("Spam Detected"));
        assert!(!body.contains("Ham / Safe Message"));
    }

    #[tokio::test]
    async fn missing_field_counts_as_blank() {
        let (_, body) = send(form_post("/", "")).await;
        assert!(body.contains("Please enter a message before clicking the button!"));
    }

    #[tokio::test]
    async fn insights_page_has_charts() {
        let req = Request::get("/insights").body(Body::empty()).unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("<svg").count(), 2);
    }

    #[tokio::test]
    async fn insights_submission_classifies_and_keeps_charts() {
        let (_, body) = send(form_post(
            "/insights",
            "message=WIN+A+FREE+IPHONE+NOW%21%21%21+CLICK+HERE",
        ))
        .await;
        assert!(body.contains("Spam Detected"));
        assert_eq!(body.matches("<svg").count(), 2);
    }

    #[tokio::test]
    async fn api_classifies_spam() {
        let (status, body) = send(json_post(
            serde_json::json!({ "message": "WIN A FREE IPHONE NOW!!! CLICK HERE" }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["label"], "spam");
        assert_eq!(json["code"], 1);
        assert_eq!(json["headline"], "Spam Detected");
        assert!(json["spam_probability"].as_f64().unwrap() > 0.5);
        assert!(json["classified_at"].is_string());
    }

    #[tokio::test]
    async fn api_classifies_ham() {
        let (status, body) = send(json_post(
            serde_json::json!({ "message": "Let's meet for lunch tomorrow at noon." }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["label"], "ham");
        assert_eq!(json["code"], 0);
        assert_eq!(json["headline"], "Ham / Safe Message");
    }

    #[tokio::test]
    async fn api_rejects_blank_input() {
        let (status, body) = send(json_post(serde_json::json!({ "message": "   " }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "no input provided");
    }

    #[tokio::test]
    async fn api_is_deterministic() {
        let body = serde_json::json!({ "message": "Claim your free prize now" });
        let (_, first) = send(json_post(body.clone())).await;
        let (_, second) = send(json_post(body)).await;
        let first: serde_json::Value = serde_json::from_str(&first).unwrap();
        let second: serde_json::Value = serde_json::from_str(&second).unwrap();
        assert_eq!(first["label"], second["label"]);
        assert_eq!(first["spam_probability"], second["spam_probability"]);
    }

    #[tokio::test]
    async fn api_treats_null_message_as_blank() {
        let (status, body) = send(json_post(serde_json::json!({ "message": null }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "no input provided");
    }

    #[tokio::test]
    async fn api_rejects_malformed_body_with_json_error() {
        let (status, body) = send(raw_json_post("not json".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(!json["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn api_rejects_wrong_message_type_with_json_error() {
        let (status, body) = send(json_post(serde_json::json!({ "message": 42 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["error"].is_string());
    }

    // ── Message length ──

    #[tokio::test]
    async fn api_accepts_messages_beyond_two_megabytes() {
        let text = "free cash ".repeat(300_000);
        let (status, body) = send(json_post(serde_json::json!({ "message": text }))).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["label"] == "spam" || json["label"] == "ham");
    }

    #[tokio::test]
    async fn form_accepts_messages_beyond_two_megabytes() {
        let body = format!("message={}", "free+cash+".repeat(300_000));
        let (status, page) = send(form_post("/", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("Spam Detected") || page.contains("Ham / Safe Message"));
    }

    // ── Cosmetic delay ──

    #[tokio::test(start_paused = true)]
    async fn page_waits_before_showing_a_result() {
        let form = "message=WIN+A+FREE+IPHONE+NOW%21%21%21+CLICK+HERE";
        let start = tokio::time::Instant::now();
        let (status, body) = send_to(delayed(), form_post("/", form)).await;
        assert!(start.elapsed() >= DELAY);
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Spam Detected"));
    }

    #[tokio::test(start_paused = true)]
    async fn blank_submission_skips_the_delay() {
        let start = tokio::time::Instant::now();
        let (_, body) = send_to(delayed(), form_post("/", "message=+++")).await;
        assert!(start.elapsed() < DELAY);
        assert!(body.contains("Please enter a message before clicking the button!"));
    }

    #[tokio::test(start_paused = true)]
    async fn api_ignores_the_delay() {
        let request = serde_json::json!({ "message": "WIN A FREE IPHONE NOW!!! CLICK HERE" });
        let start = tokio::time::Instant::now();
        let (status, delayed_body) = send_to(delayed(), json_post(request.clone())).await;
        assert!(start.elapsed() < DELAY);
        assert_eq!(status, StatusCode::OK);

        let (_, plain_body) = send(json_post(request)).await;
        let delayed_json: serde_json::Value = serde_json::from_str(&delayed_body).unwrap();
        let plain_json: serde_json::Value = serde_json::from_str(&plain_body).unwrap();
        assert_eq!(delayed_json["label"], plain_json["label"]);
        assert_eq!(delayed_json["spam_probability"], plain_json["spam_probability"]);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_does_not_change_the_verdict() {
        let form = "message=Let%27s+meet+for+lunch+tomorrow+at+noon.";
        let (_, delayed_page) = send_to(delayed(), form_post("/", form)).await;
        let (_, plain_page) = send(form_post("/", form)).await;
        assert_eq!(delayed_page, plain_page);
    }

    #[test]
    fn default_bind_addr() {
        assert_eq!(ServerConfig::default().bind_addr(), "127.0.0.1:8501");
    }
}
