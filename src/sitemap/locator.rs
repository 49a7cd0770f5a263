//! Sitemap discovery
//!
//! Tries conventional locations first and falls back to the `Sitemap:`
//! directive in robots.txt.

use crate::config::DiscoveryConfig;
use crate::crawler::Fetcher;
use crate::robots::sitemap_from_robots;
use crate::url::site_url;
use reqwest::StatusCode;

/// Locates the sitemap for a domain
///
/// # Discovery Order
///
/// 1. Each configured path, in order; the first 200 response whose
///    Content-Type mentions `xml` wins
/// 2. The first `Sitemap:` line of robots.txt
///
/// A failed request counts as a miss, never as an error.
///
/// # Returns
///
/// * `Some(String)` - The sitemap URL
/// * `None` - No strategy produced a sitemap
pub async fn locate_sitemap(
    fetcher: &Fetcher,
    discovery: &DiscoveryConfig,
    domain: &str,
) -> Option<String> {
    for path in &discovery.sitemap_paths {
        let candidate = site_url(&discovery.scheme, domain, path);

        match fetcher.fetch(&candidate).await {
            Ok(result) if is_sitemap_response(result.status, &result.content_type) => {
                tracing::info!("Found sitemap at {}", candidate);
                return Some(candidate);
            }
            Ok(result) => {
                tracing::debug!(
                    "No sitemap at {} (status {}, content-type {:?})",
                    candidate,
                    result.status,
                    result.content_type
                );
            }
            Err(e) => {
                tracing::debug!("Sitemap candidate {} failed: {}", candidate, e);
            }
        }
    }

    let declared = sitemap_from_robots(fetcher, &discovery.scheme, domain).await;
    match &declared {
        Some(url) => tracing::info!("Found sitemap {} in robots.txt", url),
        None => tracing::info!("No sitemap found for {}", domain),
    }
    declared
}

/// Only an exact 200 carrying an XML content type counts as a sitemap
fn is_sitemap_response(status: StatusCode, content_type: &str) -> bool {
    status == StatusCode::OK && content_type.contains("xml")
}
