//! Stock-Grade — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stock_grade::api::{self, AppState};
use stock_grade::metrics::Metrics;
use stock_grade::news::NewsApiClient;
use stock_grade::rating::RatingEngine;

/// Tracing is always on, in every environment; there is no dev-only gate.
/// RUST_LOG overrides the default filter.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stock_grade=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Keyword tiers are compiled once here and stay immutable for the
    // process lifetime; every request borrows the same engine.
    let rating = RatingEngine::from_toml()?;
    let news = NewsApiClient::from_env();

    let metrics = Metrics::init();

    let state = AppState {
        rating: Arc::new(rating),
        news: Arc::new(news),
    };
    let router = api::create_router(state).merge(metrics.router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "stock-grade listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
