use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::news::NewsSource;
use crate::pipeline::{self, AnalyzeEntry};
use crate::rating::RatingEngine;

#[derive(Clone)]
pub struct AppState {
    pub rating: Arc<RatingEngine>,
    pub news: Arc<dyn NewsSource>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", get(analyze))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn home() -> &'static str {
    "Stock-grade: GET /analyze?symbols=AAPL,TSLA&limit=5 — returns JSON of headlines rated 1-4 stars.\n\
     Set NEWS_API_KEY environment variable before deploying."
}

// Both params stay strings so malformed input falls back to defaults
// instead of a 400 from the extractor.
#[derive(Deserialize)]
struct AnalyzeParams {
    symbols: Option<String>,
    limit: Option<String>,
}

async fn analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Json<Vec<AnalyzeEntry>> {
    let symbols = pipeline::parse_symbols(params.symbols.as_deref());
    let limit = pipeline::clamp_limit(params.limit.as_deref());

    let entries =
        pipeline::analyze_symbols(state.news.as_ref(), &state.rating, &symbols, limit).await;
    Json(entries)
}
