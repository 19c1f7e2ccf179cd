//! Gateway token resolution
//!
//! A gateway page points at the real listing page in one of two ways:
//!
//! 1. A script assignment `var url = '<target>';`. This form is authoritative
//!    and is read straight from the raw body, before any markup parsing.
//! 2. A hyperlink whose `href` contains `token=`. Root-relative targets are
//!    anchored to the gateway's origin.
//!
//! # Script literal grammar
//!
//! ```text
//! assignment := "var" WS+ "url" WS* "=" WS* "'" literal "'"
//! literal    := shortest run of characters up to the next "'"
//! ```
//!
//! The literal is returned verbatim: no unescaping and no scheme validation.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{ResolveError, Result};

/// Substring that marks a tokenized hyperlink target.
pub const TOKEN_MARKER: &str = "token=";

static SCRIPT_URL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"var\s+url\s*=\s*'(.*?)'").expect("script literal pattern is valid")
});

static TOKEN_ANCHOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"a[href*="token="]"#).expect("token anchor selector is valid")
});

/// Find the listing page URL embedded in a gateway page.
pub fn resolve(html: &str, origin: &Url) -> Result<String> {
    if let Some(literal) = script_url_literal(html) {
        tracing::debug!(target_url = %literal, "Token found in script literal");
        return Ok(literal.to_string());
    }

    if let Some(href) = first_token_href(html) {
        let resolved = anchor_to_origin(&href, origin);
        tracing::debug!(target_url = %resolved, "Token found in anchor");
        return Ok(resolved);
    }

    Err(ResolveError::TokenNotFound)
}

/// Extract the `var url = '...'` literal from a raw body.
pub fn script_url_literal(body: &str) -> Option<&str> {
    SCRIPT_URL_LITERAL
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

fn first_token_href(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&TOKEN_ANCHOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

/// Prefix root-relative targets with the gateway's scheme, host and port.
fn anchor_to_origin(href: &str, origin: &Url) -> String {
    if !href.starts_with('/') {
        return href.to_string();
    }

    let host = origin.host_str().unwrap_or_default();
    match origin.port() {
        Some(port) => format!("{}://{host}:{port}{href}", origin.scheme()),
        None => format!("{}://{host}{href}", origin.scheme()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://gate.example/file/abc?x=1").unwrap()
    }

    #[test]
    fn script_literal_is_returned_verbatim() {
        let html = "<script>var url = 'https://mirror.example/page2';</script>";
        assert_eq!(
            resolve(html, &origin()).unwrap(),
            "https://mirror.example/page2"
        );
    }

    #[test]
    fn script_literal_wins_over_token_anchor() {
        let html = r#"
            <a href="https://elsewhere.example/go?token=zzz">go</a>
            <script>var   url='https://mirror.example/real';</script>
        "#;
        assert_eq!(
            resolve(html, &origin()).unwrap(),
            "https://mirror.example/real"
        );
    }

    #[test]
    fn script_literal_is_not_scheme_checked() {
        let html = "<script>var url = 'not a url at all';</script>";
        assert_eq!(resolve(html, &origin()).unwrap(), "not a url at all");
    }

    #[test]
    fn other_variable_names_are_ignored() {
        assert_eq!(script_url_literal("var link = 'https://a.example';"), None);
        assert_eq!(script_url_literal("var urls = 'https://a.example';"), None);
    }

    #[test]
    fn root_relative_token_anchor_uses_gateway_origin() {
        let html = r#"<a href="/dl.php?token=abc">Download</a>"#;
        assert_eq!(
            resolve(html, &origin()).unwrap(),
            "https://gate.example/dl.php?token=abc"
        );
    }

    #[test]
    fn root_relative_keeps_explicit_port() {
        let html = r#"<a href="/dl?token=1">x</a>"#;
        let origin = Url::parse("http://127.0.0.1:8080/start").unwrap();
        assert_eq!(
            resolve(html, &origin).unwrap(),
            "http://127.0.0.1:8080/dl?token=1"
        );
    }

    #[test]
    fn absolute_token_anchor_is_unchanged() {
        let html = r#"
            <a href="https://other.example/plain">first</a>
            <a href="https://cdn.example/get?token=q">second</a>
            <a href="https://cdn.example/get?token=r">third</a>
        "#;
        assert_eq!(
            resolve(html, &origin()).unwrap(),
            "https://cdn.example/get?token=q"
        );
    }

    #[test]
    fn nothing_to_follow_is_token_not_found() {
        let html = r#"<html><a href="/about">About</a></html>"#;
        assert!(matches!(
            resolve(html, &origin()),
            Err(ResolveError::TokenNotFound)
        ));
    }
}
