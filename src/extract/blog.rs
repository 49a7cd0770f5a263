use crate::classify::PageKind;
use crate::extract::html::{first_attr, first_text, landmark_text};
use crate::extract::{ExtractedRecord, PageExtractor};
use scraper::Html;
use serde::Serialize;
use url::Url;

/// A blog post, on any kind of site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    pub url: String,
    /// First `<h1>` text
    pub title: String,
    /// `datetime` attribute of the first dated `<time>`, unparsed
    pub date: String,
    /// `<article>` text; never the whole page
    pub content: String,
}

/// Extracts [`BlogPost`] records
pub struct BlogExtractor;

impl PageExtractor for BlogExtractor {
    fn kind(&self) -> PageKind {
        PageKind::Blog
    }

    fn extract(&self, page_url: &str, _base_url: &Url, document: &Html) -> ExtractedRecord {
        ExtractedRecord::Blog(BlogPost {
            url: page_url.to_string(),
            title: first_text(document, "h1"),
            date: first_attr(document, "time[datetime]", "datetime"),
            content: landmark_text(document, "article"),
        })
    }
}
