// src/pipeline.rs
//! Fetch-and-rank pipeline: per-symbol fetch, rating, zero-filter, and the
//! final rating/recency sort.

use chrono::{DateTime, Utc};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::news::NewsSource;
use crate::rating::{stars, RatingEngine};

pub const DEFAULT_SYMBOLS: &[&str] = &["AAPL", "TSLA", "MSFT", "GOOGL"];
pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const MAX_PAGE_SIZE: usize = 50;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("news_fetch_errors_total", "Per-symbol fetch failures.");
        describe_counter!("headlines_rated_total", "Headlines run through the rater.");
        describe_counter!(
            "headlines_kept_total",
            "Headlines kept after dropping zero ratings."
        );
    });
}

#[derive(Debug, Clone, Serialize)]
pub struct RatedHeadline {
    pub symbol: String,
    pub title: String,
    pub rating: u8,
    pub stars: String,
    pub url: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolError {
    pub symbol: String,
    pub error: String,
}

/// Response entry: either a rated headline or a per-symbol error record.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalyzeEntry {
    Headline(RatedHeadline),
    Error(SymbolError),
}

impl AnalyzeEntry {
    fn rating(&self) -> u8 {
        match self {
            AnalyzeEntry::Headline(h) => h.rating,
            AnalyzeEntry::Error(_) => 0,
        }
    }

    fn published_at(&self) -> Option<&str> {
        match self {
            AnalyzeEntry::Headline(h) => h.published_at.as_deref(),
            AnalyzeEntry::Error(_) => None,
        }
    }
}

/// Parse the `symbols` query value: trimmed, uppercased, empties dropped.
/// Missing or all-empty input falls back to the default list.
pub fn parse_symbols(raw: Option<&str>) -> Vec<String> {
    let symbols: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    if symbols.is_empty() {
        DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
    } else {
        symbols
    }
}

/// Parse the `limit` query value. Anything non-numeric or outside 1..=50
/// falls back to the default rather than erroring.
pub fn clamp_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| (1..=MAX_PAGE_SIZE).contains(n))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Sort timestamp: RFC 3339, with missing/unparsable values treated as the
/// oldest possible instant so they sink within their rating band.
fn sort_timestamp(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Sort entries by rating descending, then publish time descending.
/// Error entries carry no rating and rank after every rated headline.
pub fn sort_entries(entries: &mut [AnalyzeEntry]) {
    entries.sort_by(|a, b| {
        b.rating()
            .cmp(&a.rating())
            .then_with(|| sort_timestamp(b.published_at()).cmp(&sort_timestamp(a.published_at())))
    });
}

/// Run the whole pipeline once: fetch each symbol's headlines sequentially,
/// rate titles, drop zero ratings, isolate per-symbol failures as error
/// entries, and sort the combined set.
pub async fn analyze_symbols(
    source: &dyn NewsSource,
    engine: &RatingEngine,
    symbols: &[String],
    limit: usize,
) -> Vec<AnalyzeEntry> {
    ensure_metrics_described();

    let mut entries = Vec::new();
    for symbol in symbols {
        let articles = match source.fetch_headlines(symbol, limit).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = ?e, %symbol, "news fetch failed");
                counter!("news_fetch_errors_total").increment(1);
                entries.push(AnalyzeEntry::Error(SymbolError {
                    symbol: symbol.clone(),
                    error: e.to_string(),
                }));
                continue;
            }
        };

        for article in articles {
            let title = article.title.clone().unwrap_or_default();
            let rating = engine.rate(&title);
            counter!("headlines_rated_total").increment(1);
            if rating == 0 {
                // No relevant keywords; not worth returning.
                continue;
            }
            counter!("headlines_kept_total").increment(1);
            entries.push(AnalyzeEntry::Headline(RatedHeadline {
                symbol: symbol.clone(),
                title,
                rating,
                stars: stars(rating),
                url: article.url.clone(),
                source: article.source_name(),
                published_at: article.published_at.clone(),
            }));
        }
    }

    sort_entries(&mut entries);
    entries
}
