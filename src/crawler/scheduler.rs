//! Bounded worker pool for page extraction
//!
//! This module handles:
//! - Ordering the extraction queue (non-blog pages first)
//! - Global concurrency limiting via a semaphore
//! - Collecting outcomes from a join set in completion order
//! - Converting failed or panicked tasks into error entries

use crate::classify::{PageKind, SiteClassification};
use crate::extract::ExtractedRecord;
use crate::output::CrawlEntry;
use crate::HarvestError;
use futures::FutureExt;
use std::any::Any;
use std::collections::HashSet;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// A page URL queued for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The page to fetch
    pub url: String,

    /// The extraction variant for this page
    pub kind: PageKind,
}

/// Scheduler owns the extraction queue and the concurrency limit
///
/// Every queued URL yields exactly one [`CrawlEntry`], whether the task
/// succeeds, fails or panics.
pub struct Scheduler {
    /// Global semaphore for limiting concurrent extractions
    semaphore: Arc<Semaphore>,

    /// URLs in submission order
    queue: Vec<QueuedUrl>,

    max_workers: usize,
}

impl Scheduler {
    /// Creates an empty scheduler allowing `max_workers` concurrent tasks
    pub fn new(max_workers: u32) -> Self {
        let max_workers = max_workers.max(1) as usize;

        Self {
            semaphore: Arc::new(Semaphore::new(max_workers)),
            queue: Vec::new(),
            max_workers,
        }
    }

    /// Builds a scheduler for a resolved URL set
    ///
    /// Each URL gets its kind from [`PageKind::select`]. Non-blog pages are
    /// submitted ahead of blog pages; relative order within each group is
    /// preserved.
    pub fn from_urls(
        urls: Vec<String>,
        classification: SiteClassification,
        max_workers: u32,
    ) -> Self {
        let mut scheduler = Self::new(max_workers);

        let (blog, other): (Vec<QueuedUrl>, Vec<QueuedUrl>) = urls
            .into_iter()
            .map(|url| QueuedUrl {
                kind: PageKind::select(&url, classification),
                url,
            })
            .partition(|queued| queued.kind == PageKind::Blog);

        scheduler.queue.extend(other);
        scheduler.queue.extend(blog);
        scheduler
    }

    /// URLs waiting to run, in submission order
    pub fn queued(&self) -> &[QueuedUrl] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Runs `job` for every queued URL and collects the outcomes
    ///
    /// A permit is acquired before each task is spawned, so tasks start in
    /// submission order and never more than `max_workers` run at once.
    ///
    /// # Returns
    ///
    /// One entry per queued URL, in completion order. A job error or a panic
    /// becomes a [`CrawlEntry::Failed`] for that URL.
    pub async fn run<F, Fut>(self, job: F) -> Vec<CrawlEntry>
    where
        F: Fn(QueuedUrl) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ExtractedRecord, HarvestError>> + Send + 'static,
    {
        let job = Arc::new(job);
        let total = self.queue.len();
        let mut outstanding: HashSet<String> = self.queue.iter().map(|q| q.url.clone()).collect();
        let mut tasks = JoinSet::new();

        for queued in self.queue {
            let permit = match self.semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let job = Arc::clone(&job);

            tasks.spawn(async move {
                let _permit = permit;
                let url = queued.url.clone();
                tracing::debug!("Extracting {} as {}", url, queued.kind.as_str());

                let outcome = AssertUnwindSafe(job(queued)).catch_unwind().await;
                let entry = match outcome {
                    Ok(Ok(record)) => CrawlEntry::Record(record),
                    Ok(Err(e)) => {
                        tracing::warn!("Extraction failed for {}: {}", url, e);
                        CrawlEntry::failed(url.clone(), e.to_string())
                    }
                    Err(panic) => {
                        let message = panic_message(panic.as_ref());
                        tracing::error!("Extraction task panicked for {}: {}", url, message);
                        let error = format!("extraction panicked: {}", message);
                        CrawlEntry::failed(url.clone(), error)
                    }
                };
                (url, entry)
            });
        }

        let mut entries = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((url, entry)) => {
                    outstanding.remove(&url);
                    entries.push(entry);
                }
                Err(e) => tracing::error!("Extraction task aborted: {}", e),
            }
        }

        // Anything never reported still owes the caller an entry
        for url in outstanding {
            entries.push(CrawlEntry::failed(url, "extraction task did not complete"));
        }

        entries
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
