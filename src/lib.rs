// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod metrics;
pub mod news;
pub mod pipeline;
pub mod rating;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::news::{Article, NewsApiClient, NewsSource};
pub use crate::pipeline::{AnalyzeEntry, RatedHeadline, SymbolError};
pub use crate::rating::RatingEngine;
