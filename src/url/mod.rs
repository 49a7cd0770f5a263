//! URL handling module for Sitemap-Harvest
//!
//! This module turns user input into a crawlable domain, builds candidate URLs
//! for that domain, and answers the path-shape questions the pipeline asks
//! about page URLs.

mod domain;

use crate::{UrlError, UrlResult};
use url::Url;

pub use domain::extract_domain;

/// Path segment that marks a page as a blog post
pub const BLOG_SEGMENT: &str = "/blog/";

/// Derives the crawl domain from a submitted URL
///
/// Input without a scheme (`shop.example/p/1`) is treated as HTTPS.
/// Only `http` and `https` URLs are accepted.
///
/// # Examples
///
/// ```
/// use sitemap_harvest::url::domain_from_input;
///
/// assert_eq!(domain_from_input("https://shop.example/p/1").unwrap(), "shop.example");
/// assert_eq!(domain_from_input("shop.example").unwrap(), "shop.example");
/// ```
pub fn domain_from_input(input: &str) -> UrlResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlError::Parse("empty URL".to_string()));
    }

    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{}", input))
            .map_err(|e| UrlError::Parse(e.to_string()))?,
        Err(e) => return Err(UrlError::Parse(e.to_string())),
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    extract_domain(&url).ok_or(UrlError::MissingDomain)
}

/// Builds an absolute URL for `path` on `domain`
pub fn site_url(scheme: &str, domain: &str, path: &str) -> String {
    format!("{}://{}{}", scheme, domain, path)
}

/// Returns true if the URL's path marks it as a blog post
///
/// Unparseable input falls back to a substring check on the raw string.
pub fn is_blog_url(page_url: &str) -> bool {
    match Url::parse(page_url) {
        Ok(url) => url.path().contains(BLOG_SEGMENT),
        Err(_) => page_url.contains(BLOG_SEGMENT),
    }
}

/// Resolves a possibly-relative reference against a base URL
///
/// Returns None for empty references, `data:`/`javascript:` URIs, and
/// anything that does not resolve to HTTP(S).
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with("data:") || href.starts_with("javascript:") {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
