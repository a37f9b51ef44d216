use super::pipeline::ingest_book;
use super::types::IngestRequest;
use crate::server::{AppState, run_pipeline};
use crate::types::{PipelineOutcome, normalize_title};

use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_ingest_book(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<IngestRequest>,
) -> (StatusCode, Json<PipelineOutcome>) {
    let book = normalize_title(&req.title);
    let display_count = req.k.unwrap_or(state.default_display_count);

    tracing::info!("Ingestion requested for '{}' from {}", book, req.url);

    let worker_book = book.clone();
    run_pipeline(book, move || {
        ingest_book(
            state.store.as_ref(),
            state.fetcher.as_ref(),
            &worker_book,
            &req.url,
            display_count,
        )
    })
    .await
}
