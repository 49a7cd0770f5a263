//! Crawler module for sitemap-driven page extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - Bounded scheduling of extraction tasks
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, FetchResult, Fetcher};
pub use scheduler::{QueuedUrl, Scheduler};
