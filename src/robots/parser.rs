//! Robots.txt parser implementation
//!
//! Only the `Sitemap:` directive is interpreted. Access rules are ignored.

/// Literal directive prefix; matching is case-sensitive
const SITEMAP_DIRECTIVE: &str = "Sitemap:";

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content
    content: String,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// All declared sitemap URLs, in file order
    ///
    /// Lines are scanned one at a time. Leading whitespace is tolerated, the
    /// `Sitemap:` prefix must match exactly, and directives with an empty
    /// value are skipped.
    pub fn sitemaps(&self) -> impl Iterator<Item = &str> {
        self.content.lines().filter_map(|line| {
            let value = line.trim_start().strip_prefix(SITEMAP_DIRECTIVE)?.trim();
            if value.is_empty() {
                None
            } else {
                Some(value)
            }
        })
    }

    /// The first declared sitemap URL; later declarations are ignored
    pub fn sitemap(&self) -> Option<&str> {
        self.sitemaps().next()
    }
}
