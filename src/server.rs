//! HTTP Façade
//!
//! Exposes both pipelines over HTTP so a front end can drive them. The pipelines
//! are synchronous and block on network and disk, so every request runs its
//! pipeline on Tokio's blocking pool.
//!
//! ## Routes
//! - `GET  /books/:title?k=N` - lookup pipeline
//! - `POST /books` - ingestion pipeline, JSON [`IngestRequest`](crate::ingestion::types::IngestRequest)
//! - `POST /admin/reset` - drops every record of every book
//! - `GET  /health` - liveness

use crate::ingestion::fetch::Fetcher;
use crate::ingestion::handlers::handle_ingest_book;
use crate::lookup::handlers::handle_lookup_book;
use crate::storage::types::FrequencyStore;
use crate::types::{FailureKind, PipelineOutcome};

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Collaborators shared by every request.
pub struct AppState {
    pub store: Arc<dyn FrequencyStore>,
    pub fetcher: Arc<dyn Fetcher>,
    pub default_display_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/books", post(handle_ingest_book))
        .route("/books/:title", get(handle_lookup_book))
        .route("/admin/reset", post(handle_reset))
        .route("/health", get(handle_health))
        .layer(Extension(state))
}

/// Runs a pipeline on the blocking pool and maps its outcome to a response.
pub async fn run_pipeline<F>(book: String, job: F) -> (StatusCode, Json<PipelineOutcome>)
where
    F: FnOnce() -> PipelineOutcome + Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(outcome) => (status_for(&outcome), Json(outcome)),
        Err(err) => {
            tracing::error!("Pipeline worker for '{}' failed: {}", book, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PipelineOutcome::Failed {
                    book,
                    kind: FailureKind::Internal,
                    message: format!("pipeline worker failed: {}", err),
                }),
            )
        }
    }
}

pub fn status_for(outcome: &PipelineOutcome) -> StatusCode {
    match outcome {
        PipelineOutcome::Ranked { .. } => StatusCode::OK,
        PipelineOutcome::NotFound { .. } => StatusCode::NOT_FOUND,
        PipelineOutcome::Failed { kind, .. } => match kind {
            FailureKind::AlreadyIngested => StatusCode::CONFLICT,
            FailureKind::Fetch => StatusCode::BAD_GATEWAY,
            FailureKind::Storage | FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

pub async fn handle_reset(
    Extension(state): Extension<Arc<AppState>>,
) -> (StatusCode, Json<ResetResponse>) {
    let result = tokio::task::spawn_blocking(move || state.store.reset()).await;

    match result {
        Ok(Ok(())) => (StatusCode::OK, Json(ResetResponse { success: true })),
        Ok(Err(e)) => {
            tracing::error!("Failed to reset store: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResetResponse { success: false }),
            )
        }
        Err(e) => {
            tracing::error!("Reset worker failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResetResponse { success: false }),
            )
        }
    }
}

pub async fn handle_health() -> &'static str {
    "ok"
}
