//! Sitemap discovery and resolution
//!
//! - `locator`: finds a sitemap URL for a domain
//! - `parser`: reads `<urlset>` and `<sitemapindex>` documents
//! - `resolver`: expands nested indexes into a flat, unique URL list

mod locator;
mod parser;
mod resolver;

pub use locator::locate_sitemap;
pub use parser::{parse_sitemap, SitemapDocument, SitemapEntry};
pub use resolver::resolve_sitemap;
