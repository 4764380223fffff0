//! Link extraction from HTML content
//!
//! Yields the `href` of every anchor and the `src` of every image in
//! document order. Nothing is resolved or filtered here beyond dropping
//! absent and empty attributes; host scoping and resolution belong to the
//! coordinator.

use scraper::{Html, Selector};
use std::fmt;

/// Which element a link was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Anchor,
    Image,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anchor => write!(f, "anchor"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// A raw link discovered in a page
#[derive(Debug, Clone)]
pub struct ExtractedLink {
    pub kind: LinkKind,
    pub href: String,
}

/// Extracts anchor hrefs and image sources from HTML bytes
///
/// The bytes are decoded lossily; ill-formed UTF-8 affects at most the
/// text around it, and the parser tolerates arbitrarily broken markup, so
/// this never fails. A page with no usable links simply yields nothing.
pub fn extract_links(html_bytes: &[u8]) -> Vec<ExtractedLink> {
    let html = String::from_utf8_lossy(html_bytes);
    let document = Html::parse_document(&html);

    let selector = match Selector::parse("a[href], img[src]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let (kind, attribute) = match element.value().name() {
            "a" => (LinkKind::Anchor, "href"),
            "img" => (LinkKind::Image, "src"),
            _ => continue,
        };

        match element.value().attr(attribute) {
            Some(raw) if !raw.is_empty() => links.push(ExtractedLink {
                kind,
                href: raw.to_string(),
            }),
            _ => {}
        }
    }

    links
}
