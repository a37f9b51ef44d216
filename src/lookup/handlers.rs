use super::pipeline::lookup_book;
use crate::server::{AppState, run_pipeline};
use crate::types::{PipelineOutcome, normalize_title};

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub k: Option<usize>,
}

pub async fn handle_lookup_book(
    Extension(state): Extension<Arc<AppState>>,
    Path(title): Path<String>,
    Query(params): Query<LookupParams>,
) -> (StatusCode, Json<PipelineOutcome>) {
    let book = normalize_title(&title);
    let display_count = params.k.unwrap_or(state.default_display_count);

    let worker_book = book.clone();
    run_pipeline(book, move || {
        lookup_book(state.store.as_ref(), &worker_book, display_count)
    })
    .await
}
