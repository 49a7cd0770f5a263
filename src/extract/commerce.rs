use crate::classify::PageKind;
use crate::extract::html::{first_attr, first_text, image_sources};
use crate::extract::{ExtractedRecord, PageExtractor};
use scraper::Html;
use serde::Serialize;
use url::Url;

/// A product page on a commerce site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommerceProduct {
    pub url: String,
    /// First `<h1>` text
    pub name: String,
    /// `product:price:amount` meta content, as published
    pub price: String,
    /// Standard description meta content
    pub description: String,
    /// Absolute URLs of `<img class="product">` images
    pub images: Vec<String>,
}

/// Extracts [`CommerceProduct`] records
pub struct CommerceExtractor;

impl PageExtractor for CommerceExtractor {
    fn kind(&self) -> PageKind {
        PageKind::Commerce
    }

    fn extract(&self, page_url: &str, base_url: &Url, document: &Html) -> ExtractedRecord {
        ExtractedRecord::Commerce(CommerceProduct {
            url: page_url.to_string(),
            name: first_text(document, "h1"),
            price: first_attr(
                document,
                r#"meta[property="product:price:amount"]"#,
                "content",
            ),
            description: first_attr(document, r#"meta[name="description"]"#, "content"),
            images: image_sources(document, "product", base_url),
        })
    }
}
