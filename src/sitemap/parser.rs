//! Sitemap XML parser
//!
//! Handles both `<urlset>` documents and `<sitemapindex>` documents, in any
//! namespace or prefix. Element names are compared by local name.

use crate::SitemapError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// One usable entry of a sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapEntry {
    /// A `<loc>` inside a `<url>` entry
    Page(String),
    /// The `<loc>` of a `<sitemap>` entry in a sitemap index
    Sitemap(String),
}

/// A parsed sitemap document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapDocument {
    /// Entries in document order
    pub entries: Vec<SitemapEntry>,
    /// `<url>`/`<sitemap>` entries dropped for lacking a usable `<loc>`
    pub skipped: usize,
}

/// Which entry a `<loc>` currently being read belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocContext {
    Url,
    Sitemap,
}

/// Parses a sitemap document
///
/// # Parsing Rules
///
/// - Every `<loc>` whose parent is `<url>` is a page URL
/// - The first `<loc>` whose parent is `<sitemap>` is a child sitemap
/// - `<loc>` elements anywhere else (e.g. `<image:loc>`) are ignored
/// - An entry with no non-empty `<loc>` is skipped and counted
///
/// # Returns
///
/// * `Ok(SitemapDocument)` - The document's entries
/// * `Err(SitemapError)` - The XML is malformed, truncated or has no root element
///
/// # Example
///
/// ```
/// use sitemap_harvest::sitemap::{parse_sitemap, SitemapEntry};
///
/// let xml = br#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://shop.example/p/1</loc></url>
/// </urlset>"#;
/// let document = parse_sitemap(xml).unwrap();
/// assert_eq!(document.entries, vec![SitemapEntry::Page("https://shop.example/p/1".into())]);
/// ```
pub fn parse_sitemap(xml: &[u8]) -> Result<SitemapDocument, SitemapError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut document = SitemapDocument::default();
    let mut buf = Vec::new();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut saw_root = false;

    // State of the <url>/<sitemap> entry and <loc> currently open
    let mut entry_has_loc = false;
    let mut loc: Option<(LocContext, String)> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                saw_root = true;
                let name = e.local_name().as_ref().to_vec();

                match name.as_slice() {
                    b"url" | b"sitemap" => entry_has_loc = false,
                    b"loc" => {
                        loc = match path.last().map(|p| p.as_slice()) {
                            Some(b"url") => Some((LocContext::Url, String::new())),
                            Some(b"sitemap") => Some((LocContext::Sitemap, String::new())),
                            _ => None,
                        };
                    }
                    _ => {}
                }

                path.push(name);
            }
            Event::Empty(e) => {
                saw_root = true;
                if matches!(e.local_name().as_ref(), b"url" | b"sitemap") {
                    document.skipped += 1;
                }
            }
            Event::Text(t) => {
                if let Some((_, text)) = loc.as_mut() {
                    match t.unescape() {
                        Ok(unescaped) => text.push_str(&unescaped),
                        Err(_) => text.push_str(&String::from_utf8_lossy(&t)),
                    }
                }
            }
            Event::CData(c) => {
                if let Some((_, text)) = loc.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) => {
                path.pop();

                match e.local_name().as_ref() {
                    b"loc" => {
                        if let Some((context, text)) = loc.take() {
                            let value = text.trim();
                            if !value.is_empty() {
                                match context {
                                    LocContext::Url => {
                                        document
                                            .entries
                                            .push(SitemapEntry::Page(value.to_string()));
                                        entry_has_loc = true;
                                    }
                                    // Only the first <loc> of a <sitemap> entry counts
                                    LocContext::Sitemap if !entry_has_loc => {
                                        document
                                            .entries
                                            .push(SitemapEntry::Sitemap(value.to_string()));
                                        entry_has_loc = true;
                                    }
                                    LocContext::Sitemap => {}
                                }
                            }
                        }
                    }
                    b"url" | b"sitemap" => {
                        if !entry_has_loc {
                            document.skipped += 1;
                        }
                        entry_has_loc = false;
                    }
                    _ => {}
                }
            }
            Event::Eof => {
                // The reader does not check for unclosed elements at end of input
                if !path.is_empty() {
                    return Err(SitemapError::Truncated(path.len()));
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(SitemapError::Empty);
    }

    Ok(document)
}
