// src/rating.rs
//! Keyword rater: tier config types, regex compilation, and headline scoring.

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

// --- env defaults & names ---
pub const DEFAULT_KEYWORDS_TOML: &str = include_str!("../config/keywords.toml");
pub const ENV_KEYWORDS_CONFIG_PATH: &str = "KEYWORDS_CONFIG_PATH";

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsRoot {
    pub tiers: TierSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TierSection {
    pub tier4: Vec<String>,
    pub tier3: Vec<String>,
    pub tier2: Vec<String>,
    pub tier1: Vec<String>,
}

/* ----------------------------
Compiled engine
---------------------------- */

/// The engine holds one compiled regex list per tier, highest priority first.
///
/// Matching is word-boundary, case-insensitive: "fda" matches "FDA approval"
/// but not "affdavit". This is a deliberate choice over plain substring
/// matching; boundary matching trades a little recall for precision.
#[derive(Debug)]
pub struct RatingEngine {
    // (rating, compiled phrases), ordered 4 -> 1
    tiers: Vec<(u8, Vec<Regex>)>,
}

fn compile_tier(rating: u8, phrases: &[String]) -> anyhow::Result<(u8, Vec<Regex>)> {
    let mut out = Vec::with_capacity(phrases.len());
    for p in phrases {
        let pattern = format!(r"(?i)\b{}\b", regex::escape(p.trim()));
        let re = Regex::new(&pattern)
            .with_context(|| format!("tier {rating} phrase `{p}` did not compile"))?;
        out.push(re);
    }
    Ok((rating, out))
}

impl RatingEngine {
    /// Load the keyword tiers. Uses KEYWORDS_CONFIG_PATH if set, otherwise the
    /// embedded default config.
    pub fn from_toml() -> anyhow::Result<Self> {
        if let Ok(p) = std::env::var(ENV_KEYWORDS_CONFIG_PATH) {
            let path = PathBuf::from(p);
            let content = fs::read_to_string(&path).with_context(|| {
                format!("failed to read keywords config at {}", path.display())
            })?;
            return Self::from_toml_str(&content);
        }
        Self::from_toml_str(DEFAULT_KEYWORDS_TOML)
    }

    /// Build from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: KeywordsRoot = toml::from_str(toml_str).context("parsing keywords toml")?;
        let tiers = vec![
            compile_tier(4, &cfg.tiers.tier4)?,
            compile_tier(3, &cfg.tiers.tier3)?,
            compile_tier(2, &cfg.tiers.tier2)?,
            compile_tier(1, &cfg.tiers.tier1)?,
        ];
        Ok(Self { tiers })
    }

    /// Rate a headline: 4, 3, 2, 1, or 0 (no tier matched).
    /// Tiers are tested highest first and the first hit wins; a headline
    /// matching both a tier-4 and a tier-2 phrase rates 4.
    pub fn rate(&self, title: &str) -> u8 {
        if title.trim().is_empty() {
            return 0;
        }
        for (rating, phrases) in &self.tiers {
            if phrases.iter().any(|re| re.is_match(title)) {
                return *rating;
            }
        }
        0
    }
}

/// Star glyph string for a rating, e.g. 3 -> "★★★".
pub fn stars(rating: u8) -> String {
    "★".repeat(rating as usize)
}

/* ----------------------------
Tests
---------------------------- */
