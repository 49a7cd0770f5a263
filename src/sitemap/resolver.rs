//! Recursive sitemap resolution
//!
//! Expands a sitemap, following nested sitemap indexes depth-first, into a
//! deduplicated list of page URLs in first-seen document order.

use crate::crawler::Fetcher;
use crate::sitemap::parser::{parse_sitemap, SitemapDocument, SitemapEntry};
use crate::HarvestError;
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashSet;
use url::Url;

/// Accumulated state of one resolution
#[derive(Debug, Default)]
struct Resolution {
    /// Sitemaps already fetched or in progress
    visited: HashSet<String>,
    seen_pages: HashSet<String>,
    pages: Vec<String>,
    failed_sitemaps: usize,
}

impl Resolution {
    fn add_page(&mut self, url: String) {
        if self.seen_pages.insert(url.clone()) {
            self.pages.push(url);
        }
    }
}

/// Resolves a sitemap into its page URLs
///
/// # Failure Policy
///
/// | Where | Effect |
/// |-------|--------|
/// | Root sitemap fetch, status or parse failure | `Err`, the run stops |
/// | Nested sitemap failure | Branch skipped, siblings still resolved |
/// | Sitemap already visited (cycle) | Branch skipped |
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Unique page URLs in first-seen order
/// * `Err(HarvestError)` - The root sitemap could not be loaded
pub async fn resolve_sitemap(
    fetcher: &Fetcher,
    sitemap_url: &str,
) -> Result<Vec<String>, HarvestError> {
    let root = load_sitemap(fetcher, sitemap_url).await?;

    // Same key form as child references, so a child pointing back at the
    // root is recognized as visited
    let root_key = sitemap_key(sitemap_url);
    let mut resolution = Resolution::default();
    resolution.visited.insert(root_key.clone());
    expand(fetcher, root_key, root, &mut resolution).await;

    tracing::info!(
        "Resolved {} unique page URLs from {} sitemap(s) ({} failed)",
        resolution.pages.len(),
        resolution.visited.len(),
        resolution.failed_sitemaps
    );

    Ok(resolution.pages)
}

/// Walks a loaded document, recursing into child sitemaps in place
fn expand<'a>(
    fetcher: &'a Fetcher,
    document_url: String,
    document: SitemapDocument,
    resolution: &'a mut Resolution,
) -> BoxFuture<'a, ()> {
    async move {
        if document.skipped > 0 {
            tracing::warn!(
                "Skipped {} entries without a usable <loc> in {}",
                document.skipped,
                document_url
            );
        }

        for entry in document.entries {
            match entry {
                SitemapEntry::Page(url) => resolution.add_page(url),
                SitemapEntry::Sitemap(loc) => {
                    let child_url = absolutize(&document_url, &loc);

                    if !resolution.visited.insert(child_url.clone()) {
                        tracing::debug!("Sitemap {} already visited, skipping", child_url);
                        continue;
                    }

                    match load_sitemap(fetcher, &child_url).await {
                        Ok(child) => expand(fetcher, child_url, child, resolution).await,
                        Err(e) => {
                            tracing::warn!("Skipping nested sitemap {}: {}", child_url, e);
                            resolution.failed_sitemaps += 1;
                        }
                    }
                }
            }
        }
    }
    .boxed()
}

/// Fetches and parses one sitemap document
async fn load_sitemap(fetcher: &Fetcher, url: &str) -> Result<SitemapDocument, HarvestError> {
    tracing::debug!("Loading sitemap {}", url);

    let result = fetcher.fetch(url).await?;
    if !result.is_success() {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: result.status.as_u16(),
        });
    }

    parse_sitemap(&result.body).map_err(|source| HarvestError::Sitemap {
        url: url.to_string(),
        source,
    })
}

/// Visited-set key for a sitemap URL: its parsed, normalized form
fn sitemap_key(url: &str) -> String {
    Url::parse(url)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| url.to_string())
}

/// Resolves a child sitemap reference against its parent document
fn absolutize(parent: &str, loc: &str) -> String {
    Url::parse(parent)
        .and_then(|base| base.join(loc))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| loc.to_string())
}
