//! Listing page parsing
//!
//! Extracts the page title, the archive flag and the button-styled anchors
//! (`a.btn`) in document order. No filtering happens here.

use std::sync::LazyLock;

use scraper::{Html, Selector};

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector is valid"));

static BUTTON_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.btn").expect("button anchor selector is valid"));

/// One candidate link as it appears in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Raw `href` attribute, empty when missing
    pub href: String,
    /// Trimmed text content
    pub text: String,
}

impl Anchor {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }
}

/// Structural view of a listing page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub title: String,
    pub is_zip: bool,
    pub anchors: Vec<Anchor>,
}

/// Parse a listing page body.
pub fn parse(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let anchors = document
        .select(&BUTTON_ANCHOR)
        .map(|a| Anchor {
            href: a.value().attr("href").unwrap_or_default().to_string(),
            text: a.text().collect::<String>().trim().to_string(),
        })
        .collect();

    ParsedPage {
        is_zip: is_zip_title(&title),
        title,
        anchors,
    }
}

/// Whether a page title names a zip archive.
pub fn is_zip_title(title: &str) -> bool {
    title.to_lowercase().ends_with(".zip")
}
