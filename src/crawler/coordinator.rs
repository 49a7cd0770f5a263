//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the pipeline that coordinates one crawl:
//! - Locating the domain's sitemap
//! - Resolving it into page URLs
//! - Classifying the site from a sample page
//! - Fanning extraction out over the worker pool
//! - Mapping whole-run failures into the JSON error shape

use crate::classify::{classify_html, SiteClassification};
use crate::config::Config;
use crate::crawler::scheduler::{QueuedUrl, Scheduler};
use crate::crawler::Fetcher;
use crate::extract::{extract_page, ExtractedRecord};
use crate::output::{CrawlEntry, CrawlResponse, CrawlSummary};
use crate::sitemap::{locate_sitemap, resolve_sitemap};
use crate::url::domain_from_input;
use crate::HarvestError;
use std::sync::Arc;
use std::time::Instant;

/// Main crawler coordinator structure
///
/// Holds the configuration and the shared fetcher. One coordinator can run
/// any number of crawls, sequentially or concurrently.
#[derive(Debug, Clone)]
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: Fetcher,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let fetcher = Fetcher::new(&config.http)?;

        Ok(Self {
            config: Arc::new(config),
            fetcher,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawls a domain, returning the per-page entries
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<CrawlEntry>)` - One entry per unique page URL, in completion order
    /// * `Err(HarvestError::SitemapNotFound)` - No sitemap could be located
    /// * `Err(HarvestError)` - The root sitemap could not be loaded
    pub async fn crawl(&self, domain: &str) -> Result<Vec<CrawlEntry>, HarvestError> {
        tracing::info!("Locating sitemap for {}", domain);
        let sitemap_url = locate_sitemap(&self.fetcher, &self.config.discovery, domain)
            .await
            .ok_or_else(|| HarvestError::SitemapNotFound {
                domain: domain.to_string(),
            })?;

        tracing::info!("Resolving sitemap {}", sitemap_url);
        let urls = resolve_sitemap(&self.fetcher, &sitemap_url).await?;

        if urls.is_empty() {
            tracing::info!("Sitemap {} lists no pages", sitemap_url);
            return Ok(Vec::new());
        }

        let classification = self.classify_site(&urls[0]).await;
        tracing::info!("Classified {} as {:?}", domain, classification);

        let scheduler = Scheduler::from_urls(urls, classification, self.config.crawler.max_workers);
        tracing::info!(
            "Extracting {} pages with {} workers",
            scheduler.len(),
            scheduler.max_workers()
        );

        let fetcher = self.fetcher.clone();
        let entries = scheduler
            .run(move |queued| {
                let fetcher = fetcher.clone();
                async move { extract_queued(&fetcher, queued).await }
            })
            .await;

        Ok(entries)
    }

    /// Classifies the site from a single sample page
    ///
    /// A sample that cannot be fetched leaves the site classified as General.
    pub async fn classify_site(&self, sample_url: &str) -> SiteClassification {
        tracing::debug!("Sampling {} for classification", sample_url);

        match self.fetcher.fetch_text(sample_url).await {
            Ok(html) => classify_html(&html, &self.config.classifier.commerce_indicators),
            Err(e) => {
                tracing::warn!(
                    "Could not fetch sample page {}, assuming general site: {}",
                    sample_url,
                    e
                );
                SiteClassification::General
            }
        }
    }

    /// Runs a crawl and shapes the outcome as a response
    ///
    /// Never fails: whole-run errors become [`CrawlResponse::Failed`].
    pub async fn run(&self, domain: &str) -> CrawlResponse {
        let start_time = Instant::now();

        match self.crawl(domain).await {
            Ok(entries) => {
                CrawlSummary::from_entries(&entries, start_time.elapsed()).log(domain);
                CrawlResponse::Pages(entries)
            }
            Err(e) => {
                tracing::error!("Crawl of {} failed: {}", domain, e);
                CrawlResponse::failed(e.to_string())
            }
        }
    }
}

/// Fetches one page and extracts its record
async fn extract_queued(
    fetcher: &Fetcher,
    queued: QueuedUrl,
) -> Result<ExtractedRecord, HarvestError> {
    let html = fetcher.fetch_text(&queued.url).await?;
    extract_page(queued.kind, &queued.url, &html)
}

/// Runs a complete crawl for a submitted URL
///
/// This is the main entry point for a one-shot crawl. It will:
/// 1. Derive the domain from the input
/// 2. Build the coordinator and its HTTP client
/// 3. Run the pipeline
///
/// # Returns
///
/// * `Ok(CrawlResponse)` - The crawl ran; the response may still be a whole-run error
/// * `Err(HarvestError)` - The input URL was unusable or the client could not be built
pub async fn run_crawl(config: Config, input_url: &str) -> Result<CrawlResponse, HarvestError> {
    let domain = domain_from_input(input_url)?;
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run(&domain).await)
}
