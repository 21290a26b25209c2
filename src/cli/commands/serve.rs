//! HTTP API server for integration with other systems.
//!
//! Provides REST endpoints for retelling, video info and transcripts.

use crate::cli::Output;
use crate::config::{ProviderConfig, Settings};
use crate::error::BrieflyError;
use crate::orchestrator::Orchestrator;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Shared application state.
pub struct AppState {
    orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }
}

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: &Settings,
    provider: ProviderConfig,
) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(settings, provider)?;
    let app = router(Arc::new(AppState::new(orchestrator)));

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Briefly API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Retell", "POST /retell");
    Output::kv("Video Info", "POST /info");
    Output::kv("Transcript", "POST /transcript");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/retell", post(retell))
        .route("/info", post(info))
        .route("/transcript", post(transcript))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct RetellRequest {
    url: String,
    /// Empty selects the configured default language
    #[serde(default)]
    language: String,
}

#[derive(Deserialize)]
struct InfoRequest {
    url: String,
}

#[derive(Serialize)]
struct TranscriptResponse {
    url: String,
    language: String,
    transcript: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
    stage: String,
}

/// HTTP status for a pipeline failure.
fn error_status(err: &BrieflyError) -> StatusCode {
    match err {
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        BrieflyError::TranscriptUnavailable { .. } => StatusCode::NOT_FOUND,
        BrieflyError::Extraction { .. }
        | BrieflyError::EmptyResponse { .. }
        | BrieflyError::Provider(_)
        | BrieflyError::ToolFailed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: BrieflyError) -> Response {
    let status = error_status(&err);
    if status.is_server_error() {
        warn!(stage = err.stage(), error = %err, "Request failed");
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            stage: err.stage().to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn retell(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RetellRequest>,
) -> Response {
    match state.orchestrator.retell_with_info(&req.url, &req.language).await {
        Ok(retelling) => Json(retelling).into_response(),
        Err(e) => error_response(e),
    }
}

async fn info(State(state): State<Arc<AppState>>, Json(req): Json<InfoRequest>) -> Response {
    match state.orchestrator.video_info(&req.url).await {
        Ok(metadata) => Json(metadata).into_response(),
        Err(e) => error_response(e),
    }
}

async fn transcript(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RetellRequest>,
) -> Response {
    let language = match state.orchestrator.fetcher().normalize_language(&req.language) {
        Ok(language) => language,
        Err(e) => return error_response(e),
    };

    match state.orchestrator.transcript(&req.url, &language).await {
        Ok(transcript) => Json(TranscriptResponse {
            url: req.url,
            language,
            transcript,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::summarization::Summarizer;
    use crate::transcript::{ExtractorRunner, TranscriptFetcher};
    use async_trait::async_trait;

    const SRT: &str = "1\n00:00:00,000 --> 00:00:02,000\nWelcome to the show\n";

    /// Serves metadata, and an SRT track only for English.
    struct FakeYtDlp;

    #[async_trait]
    impl ExtractorRunner for FakeYtDlp {
        async fn run(&self, args: &[String]) -> Result<Vec<u8>> {
            if args.iter().any(|a| a == "--dump-json") {
                return Ok(br#"{"id":"dQw4w9WgXcQ","title":"Show"}"#.to_vec());
            }

            let langs = args.iter().position(|a| a == "--sub-lang").unwrap();
            if args[langs + 1].starts_with("en,") {
                let i = args.iter().position(|a| a == "--output").unwrap();
                std::fs::write(args[i + 1].replace("%(ext)s", "en.srt"), SRT)?;
            }
            Ok(Vec::new())
        }
    }

    struct EchoSummarizer;

    #[async_trait]
    impl Summarizer for EchoSummarizer {
        async fn summarize(&self, text: &str, language: &str) -> Result<String> {
            Ok(format!("[{language}] {text}"))
        }
    }

    async fn spawn_server(scratch: &std::path::Path) -> String {
        let mut settings = Settings::default();
        settings.general.scratch_dir = scratch.to_string_lossy().into_owned();
        let fetcher = TranscriptFetcher::with_runner(Arc::new(FakeYtDlp), &settings);
        let orchestrator = Orchestrator::with_components(fetcher, Arc::new(EchoSummarizer));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(Arc::new(AppState::new(orchestrator))))
                .await
                .unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&BrieflyError::InvalidUrl("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&BrieflyError::TranscriptUnavailable {
                url: "u".into(),
                language: "fr".into(),
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&BrieflyError::Provider("down".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            error_status(&BrieflyError::Parse("empty".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_retell_endpoint() {
        let scratch = tempfile::tempdir().unwrap();
        let base = spawn_server(scratch.path()).await;

        let body: serde_json::Value = reqwest::Client::new()
            .post(format!("{base}/retell"))
            .json(&serde_json::json!({ "url": "https://youtu.be/dQw4w9WgXcQ", "language": "en" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["metadata"]["title"], "Show");
        assert_eq!(body["summary"]["video_id"], "dQw4w9WgXcQ");
        assert_eq!(body["summary"]["text"], "[en] Welcome to the show");
    }

    #[tokio::test]
    async fn test_invalid_url_is_bad_request() {
        let scratch = tempfile::tempdir().unwrap();
        let base = spawn_server(scratch.path()).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/retell"))
            .json(&serde_json::json!({ "url": "https://example.com/video" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json().await.unwrap();
        assert_eq!(body.stage, "validation");
    }

    #[tokio::test]
    async fn test_missing_transcript_is_not_found() {
        let scratch = tempfile::tempdir().unwrap();
        let base = spawn_server(scratch.path()).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/transcript"))
            .json(&serde_json::json!({ "url": "https://youtu.be/dQw4w9WgXcQ", "language": "fr" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let scratch = tempfile::tempdir().unwrap();
        let base = spawn_server(scratch.path()).await;

        let body: serde_json::Value = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
    }
}
