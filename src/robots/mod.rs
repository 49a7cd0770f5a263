//! Robots.txt handling module
//!
//! Robots.txt is consulted only as a fallback for locating a site's sitemap.

mod parser;

pub use parser::ParsedRobots;

use crate::crawler::Fetcher;
use crate::url::site_url;

/// Fetches robots.txt for a domain
///
/// # Arguments
///
/// * `fetcher` - The shared fetcher
/// * `scheme` - Scheme used to reach the domain
/// * `domain` - The domain to fetch robots.txt from
///
/// # Returns
///
/// * `Some(ParsedRobots)` - robots.txt answered with status 200
/// * `None` - Any other status, or the request failed
pub async fn fetch_robots(fetcher: &Fetcher, scheme: &str, domain: &str) -> Option<ParsedRobots> {
    let robots_url = site_url(scheme, domain, "/robots.txt");

    match fetcher.fetch(&robots_url).await {
        Ok(result) if result.status == reqwest::StatusCode::OK => {
            Some(ParsedRobots::from_content(&result.text()))
        }
        Ok(result) => {
            tracing::debug!("robots.txt for {} returned {}", domain, result.status);
            None
        }
        Err(e) => {
            tracing::debug!("Failed to fetch robots.txt for {}: {}", domain, e);
            None
        }
    }
}

/// Returns the first sitemap declared in a domain's robots.txt
pub async fn sitemap_from_robots(fetcher: &Fetcher, scheme: &str, domain: &str) -> Option<String> {
    let robots = fetch_robots(fetcher, scheme, domain).await?;
    robots.sitemap().map(|s| s.to_string())
}
