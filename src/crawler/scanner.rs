//! Single-pass HTML scanning for anchors and flag text
//!
//! A pure function from document text to two ordered sequences. Hrefs are
//! captured verbatim; deduplication belongs to the frontier, not here.

use crate::config::FLAG_SENTINEL;
use scraper::{Html, Selector};

/// Separator between a flag label and the flag value
const FLAG_SEPARATOR: &str = ": ";

/// Everything one scan pass yields from a document
#[derive(Debug, Default)]
pub struct Scan {
    /// `href` values of anchor tags, verbatim and in document order
    pub links: Vec<String>,

    /// Flag values, in document order
    pub flags: Vec<String>,
}

/// Scans an HTML document for anchor hrefs and flag-bearing text nodes.
///
/// A text node containing the flag sentinel contributes everything after the
/// first `: ` separator, so a flag value may itself contain further colons.
pub fn scan_document(html: &str) -> Scan {
    let document = Html::parse_document(html);
    let mut scan = Scan::default();

    if let Ok(anchors) = Selector::parse("a[href]") {
        for element in document.select(&anchors) {
            if let Some(href) = element.value().attr("href") {
                scan.links.push(href.to_string());
            }
        }
    }

    for text in document.root_element().text() {
        if text.contains(FLAG_SENTINEL) {
            if let Some((_, flag)) = text.split_once(FLAG_SEPARATOR) {
                scan.flags.push(flag.to_string());
            }
        }
    }

    scan
}
