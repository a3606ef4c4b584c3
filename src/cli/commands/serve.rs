//! HTTP API server for integration with other systems.
//!
//! Exposes the ingestion and search pipeline as REST endpoints.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::{ErrorKind, SentinelError};
use crate::index::RecordMetadata;
use crate::media::MediaInput;
use crate::orchestrator::{Pipeline, PipelineResult};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    pipeline: Pipeline,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(settings)?;

    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/ingest", post(ingest))
        .route("/search", post(search))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Sentinel API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Ingest", "POST /ingest");
    Output::kv("Search", "POST /search");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Serialize)]
struct IngestResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<PipelineResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
    #[serde(default)]
    top_k: Option<usize>,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<Vec<MatchInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct MatchInfo {
    id: String,
    score: f32,
    metadata: RecordMetadata,
}

fn error_status(e: &SentinelError) -> StatusCode {
    match e.kind() {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ingest(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut url: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("file") => {
                let name = field
                    .file_name()
                    .unwrap_or("upload.mp4")
                    .to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((name, bytes.to_vec())),
                    Err(_) => {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(IngestResponse {
                                success: false,
                                data: None,
                                error: Some("failed to read file upload".to_string()),
                            }),
                        )
                            .into_response()
                    }
                }
            }
            Some("url") => {
                url = field.text().await.ok().filter(|u| !u.is_empty());
            }
            _ => {}
        }
    }

    let media = match MediaInput::from_parts(file, url) {
        Ok(media) => media,
        Err(e) => {
            return (
                error_status(&e),
                Json(IngestResponse {
                    success: false,
                    data: None,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    };

    match state.pipeline.ingest(media).await {
        Ok(result) => Json(IngestResponse {
            success: true,
            data: Some(result),
            error: None,
        })
        .into_response(),
        Err(e) => (
            error_status(&e),
            Json(IngestResponse {
                success: false,
                data: None,
                error: Some(e.to_string()),
            }),
        )
            .into_response(),
    }
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> impl IntoResponse {
    match state.pipeline.search(&req.query, req.top_k).await {
        Ok(results) => Json(SearchResponse {
            success: true,
            matches: Some(
                results
                    .into_iter()
                    .map(|r| MatchInfo {
                        id: r.id,
                        score: r.score,
                        metadata: r.metadata,
                    })
                    .collect(),
            ),
            error: None,
        })
        .into_response(),
        Err(e) => (
            error_status(&e),
            Json(SearchResponse {
                success: false,
                matches: None,
                error: Some(e.to_string()),
            }),
        )
            .into_response(),
    }
}
