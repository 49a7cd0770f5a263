//! Run statistics
//!
//! A summary of one crawl's outcomes, logged when the run finishes.

use crate::classify::PageKind;
use crate::output::CrawlEntry;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Number of entries, records and errors alike
    pub total: usize,
    pub commerce: usize,
    pub generic: usize,
    pub blog: usize,
    pub errors: usize,
    pub elapsed: Duration,
}

impl CrawlSummary {
    /// Tallies entries by outcome
    pub fn from_entries(entries: &[CrawlEntry], elapsed: Duration) -> Self {
        let mut summary = Self {
            total: entries.len(),
            elapsed,
            ..Self::default()
        };

        for entry in entries {
            match entry {
                CrawlEntry::Record(record) => match record.kind() {
                    PageKind::Commerce => summary.commerce += 1,
                    PageKind::Generic => summary.generic += 1,
                    PageKind::Blog => summary.blog += 1,
                },
                CrawlEntry::Failed { .. } => summary.errors += 1,
            }
        }

        summary
    }

    /// Fraction of entries that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.total - self.errors) as f64 / self.total as f64
        }
    }

    pub fn log(&self, domain: &str) {
        tracing::info!(
            "Crawl of {} finished in {:.2?}: {} pages \
             ({} commerce, {} generic, {} blog, {} errors, {:.1}% ok)",
            domain,
            self.elapsed,
            self.total,
            self.commerce,
            self.generic,
            self.blog,
            self.errors,
            self.success_rate() * 100.0
        );
    }
}
