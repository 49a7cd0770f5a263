use crate::classify::PageKind;
use crate::extract::html::{first_attr, first_element, first_text, page_text, visible_text};
use crate::extract::{ExtractedRecord, PageExtractor};
use scraper::Html;
use serde::Serialize;
use url::Url;

/// A content page on a non-commerce site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericPage {
    pub url: String,
    /// `<title>` text
    pub title: String,
    pub description: String,
    /// `<main>` text, or the whole page body when there is no `<main>`
    pub main_content: String,
}

/// Extracts [`GenericPage`] records
pub struct GenericExtractor;

impl PageExtractor for GenericExtractor {
    fn kind(&self) -> PageKind {
        PageKind::Generic
    }

    fn extract(&self, page_url: &str, _base_url: &Url, document: &Html) -> ExtractedRecord {
        let main_content = match first_element(document, "main") {
            Some(main) => visible_text(main),
            None => page_text(document),
        };

        ExtractedRecord::Generic(GenericPage {
            url: page_url.to_string(),
            title: first_text(document, "title"),
            description: first_attr(document, r#"meta[name="description"]"#, "content"),
            main_content,
        })
    }
}
