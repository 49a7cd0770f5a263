//! Output module for crawl results
//!
//! This module handles:
//! - The JSON shapes returned to callers
//! - Run statistics logged at the end of each crawl

pub mod stats;

pub use stats::CrawlSummary;

use crate::extract::ExtractedRecord;
use serde::Serialize;

/// Outcome for a single page URL
///
/// Serializes as the bare record, or as `{"url": .., "error": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CrawlEntry {
    Record(ExtractedRecord),
    Failed { url: String, error: String },
}

impl CrawlEntry {
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failed {
            url: url.into(),
            error: error.into(),
        }
    }

    /// The page this entry describes
    pub fn url(&self) -> &str {
        match self {
            Self::Record(record) => record.url(),
            Self::Failed { url, .. } => url,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Response to one crawl request
///
/// Either the per-page entries as a JSON array, or a single
/// `{"error": ..}` object when the run could not start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CrawlResponse {
    Pages(Vec<CrawlEntry>),
    Failed { error: String },
}

impl CrawlResponse {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    /// Per-page entries, or None for a whole-run error
    pub fn entries(&self) -> Option<&[CrawlEntry]> {
        match self {
            Self::Pages(entries) => Some(entries),
            Self::Failed { .. } => None,
        }
    }

    /// The whole-run error message, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Pages(_) => None,
            Self::Failed { error } => Some(error),
        }
    }

    /// Serializes the response as JSON
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
