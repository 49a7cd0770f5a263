//! Page extraction
//!
//! One extractor per [`PageKind`], each turning a parsed page into its own
//! record shape. Records serialize to JSON with exactly their own field set.

mod blog;
mod commerce;
mod generic;
pub mod html;

pub use blog::{BlogExtractor, BlogPost};
pub use commerce::{CommerceExtractor, CommerceProduct};
pub use generic::{GenericExtractor, GenericPage};

use crate::classify::PageKind;
use crate::HarvestError;
use scraper::Html;
use serde::Serialize;
use url::Url;

/// A typed record extracted from one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractedRecord {
    Commerce(CommerceProduct),
    Generic(GenericPage),
    Blog(BlogPost),
}

impl ExtractedRecord {
    /// The page the record was extracted from
    pub fn url(&self) -> &str {
        match self {
            ExtractedRecord::Commerce(product) => &product.url,
            ExtractedRecord::Generic(page) => &page.url,
            ExtractedRecord::Blog(post) => &post.url,
        }
    }

    pub fn kind(&self) -> PageKind {
        match self {
            ExtractedRecord::Commerce(_) => PageKind::Commerce,
            ExtractedRecord::Generic(_) => PageKind::Generic,
            ExtractedRecord::Blog(_) => PageKind::Blog,
        }
    }
}

/// Extraction capability shared by all page variants
pub trait PageExtractor: Send + Sync {
    /// The variant this extractor produces
    fn kind(&self) -> PageKind;

    /// Extracts a record from a parsed page
    ///
    /// `page_url` is stored verbatim in the record. `base_url` is its parsed
    /// form, used only to resolve relative links. Missing elements never fail
    /// extraction; the affected fields are empty.
    fn extract(&self, page_url: &str, base_url: &Url, document: &Html) -> ExtractedRecord;
}

/// Returns the extractor that handles `kind`
pub fn extractor_for(kind: PageKind) -> &'static dyn PageExtractor {
    match kind {
        PageKind::Blog => &BlogExtractor,
        PageKind::Commerce => &CommerceExtractor,
        PageKind::Generic => &GenericExtractor,
    }
}

/// Parses `html` and extracts a record of the given kind
///
/// # Arguments
///
/// * `kind` - The extraction variant
/// * `page_url` - The URL the page was fetched from, kept verbatim in the
///   record; its parsed form is the base for resolving relative image links
/// * `html` - The page body
///
/// # Returns
///
/// * `Ok(ExtractedRecord)` - The extracted record
/// * `Err(HarvestError)` - The page URL itself is not a valid URL
///
/// # Example
///
/// ```
/// use sitemap_harvest::extract::extract_page;
/// use sitemap_harvest::PageKind;
///
/// let html = "<html><body><h1>Launch</h1><article>We shipped.</article></body></html>";
/// let record = extract_page(PageKind::Blog, "https://shop.example/blog/launch", html).unwrap();
/// assert_eq!(record.url(), "https://shop.example/blog/launch");
/// ```
pub fn extract_page(
    kind: PageKind,
    page_url: &str,
    html: &str,
) -> Result<ExtractedRecord, HarvestError> {
    let base_url = Url::parse(page_url)?;
    let document = Html::parse_document(html);
    let extractor = extractor_for(kind);

    let record = extractor.extract(page_url, &base_url, &document);
    tracing::trace!("Extracted {} record for {}", extractor.kind().as_str(), page_url);
    Ok(record)
}
