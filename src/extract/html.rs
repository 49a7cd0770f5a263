//! HTML query helpers shared by the page extractors
//!
//! Every lookup here returns an owned `String`, falling back to the empty
//! string when the element or attribute is missing.

use crate::url::resolve_link;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text is never rendered
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Returns the first element matching `css`, if any
pub fn first_element<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Text of the first element matching `css`, trimmed
///
/// Nested markup is flattened, so `<h1>Blue <em>Mug</em></h1>` yields
/// `"Blue Mug"`.
pub fn first_text(document: &Html, css: &str) -> String {
    first_element(document, css)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Attribute value of the first element matching `css`
///
/// An element that matches but lacks the attribute also yields `""`.
pub fn first_attr(document: &Html, css: &str, attr: &str) -> String {
    first_element(document, css)
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Whitespace-normalized visible text of an element
///
/// Text inside script, style, noscript and template elements is skipped.
/// Runs of whitespace collapse to a single space.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut words = Vec::new();
    collect_visible_words(element, &mut words);
    words.join(" ")
}

fn collect_visible_words<'a>(element: ElementRef<'a>, words: &mut Vec<&'a str>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            words.extend(text.split_whitespace());
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !HIDDEN_ELEMENTS.contains(&child_element.value().name()) {
                collect_visible_words(child_element, words);
            }
        }
    }
}

/// Visible text of the first element matching `css`, or `""`
pub fn landmark_text(document: &Html, css: &str) -> String {
    first_element(document, css)
        .map(visible_text)
        .unwrap_or_default()
}

/// Visible text of the whole page body
///
/// Documents without a body element fall back to the root element.
pub fn page_text(document: &Html) -> String {
    let root = first_element(document, "body").unwrap_or_else(|| document.root_element());
    visible_text(root)
}

/// Absolute `src` URLs of images carrying `class_name` in their class list
///
/// Images without a resolvable `src` are skipped.
pub fn image_sources(document: &Html, class_name: &str, base_url: &Url) -> Vec<String> {
    let selector = match Selector::parse("img[src]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter(|img| img.value().classes().any(|class| class == class_name))
        .filter_map(|img| img.value().attr("src"))
        .filter_map(|src| resolve_link(src, base_url))
        .collect()
}
