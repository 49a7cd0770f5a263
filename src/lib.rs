//! Sitemap-Harvest: sitemap-driven structured page extraction
//!
//! This crate discovers a website's sitemap, enumerates its page URLs,
//! classifies the site as commerce or general content, and concurrently
//! extracts a typed record from every page.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod robots;
pub mod server;
pub mod sitemap;
pub mod url;

use thiserror::Error;

/// Main error type for Sitemap-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Sitemap not found. Exiting.")]
    SitemapNotFound { domain: String },

    #[error("Failed to parse sitemap {url}: {source}")]
    Sitemap { url: String, source: SitemapError },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Sitemap document errors
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document has no root element")]
    Empty,

    #[error("document ended with {0} unclosed element(s)")]
    Truncated(usize),
}

/// Result type alias for Sitemap-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use classify::{PageKind, SiteClassification};
pub use config::Config;
pub use crawler::{run_crawl, Coordinator};
pub use extract::ExtractedRecord;
pub use output::{CrawlEntry, CrawlResponse};
pub use url::{domain_from_input, is_blog_url};
