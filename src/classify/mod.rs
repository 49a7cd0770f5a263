//! Site and page classification
//!
//! A run decides once, from a single sample page, whether the site is a
//! storefront. Each page URL is then mapped to the extraction variant that
//! handles it.

use crate::url::is_blog_url;
use scraper::Html;
use serde::Serialize;

/// Whole-site classification, decided once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteClassification {
    /// Storefront: non-blog pages are extracted as products
    Commerce,
    /// Anything else: non-blog pages are extracted as generic content
    General,
}

impl SiteClassification {
    /// Returns true for commerce sites
    pub fn is_commerce(&self) -> bool {
        matches!(self, Self::Commerce)
    }
}

/// Extraction variant for a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Blog,
    Commerce,
    Generic,
}

impl PageKind {
    /// Selects the extraction variant for a page
    ///
    /// Blog paths win over the site classification; everything else follows
    /// the classification.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitemap_harvest::{PageKind, SiteClassification};
    ///
    /// let kind = PageKind::select("https://shop.example/blog/a", SiteClassification::Commerce);
    /// assert_eq!(kind, PageKind::Blog);
    ///
    /// let kind = PageKind::select("https://shop.example/p/1", SiteClassification::Commerce);
    /// assert_eq!(kind, PageKind::Commerce);
    /// ```
    pub fn select(page_url: &str, classification: SiteClassification) -> Self {
        if is_blog_url(page_url) {
            PageKind::Blog
        } else if classification.is_commerce() {
            PageKind::Commerce
        } else {
            PageKind::Generic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Blog => "blog",
            PageKind::Commerce => "commerce",
            PageKind::Generic => "generic",
        }
    }
}

/// Classifies a site from the HTML of its sample page
///
/// All text in the document is lower-cased and searched for any of the
/// `indicators`, which must already be lower-case. One hit is enough.
pub fn classify_html(html: &str, indicators: &[String]) -> SiteClassification {
    let document = Html::parse_document(html);
    let page_text = document.root_element().text().collect::<String>().to_lowercase();

    match indicators
        .iter()
        .find(|indicator| page_text.contains(indicator.as_str()))
    {
        Some(indicator) => {
            tracing::debug!("Commerce indicator found: {:?}", indicator);
            SiteClassification::Commerce
        }
        None => SiteClassification::General,
    }
}
