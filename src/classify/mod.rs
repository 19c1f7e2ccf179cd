//! Link classification
//!
//! Turns raw listing-page anchors into [`Link`]s:
//!
//! - drops messaging-app (Telegram) entries
//! - makes the target absolute and rewrites storage share links
//!   ([`storage`])
//! - derives a short, brand-normalized label
//! - marks the link trusted when a [`TrustPattern`] matches
//!
//! The trust table is injected at construction and never mutated, so one
//! classifier can serve any number of concurrent requests.

pub mod storage;

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::branding;
use crate::page::Anchor;

/// Anchor text marking a messaging-app redirect.
pub const EXCLUDED_LABEL: &str = "telegram";

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("bracket pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// A classified download or stream link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub url: String,
    pub label: String,
    pub is_trusted: bool,
}

/// What a trust pattern is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTarget {
    /// The full, rewritten URL
    #[default]
    Url,
    /// Only the URL's host
    Host,
    /// The final label
    Label,
}

/// A named trusted-host matcher.
#[derive(Debug, Clone)]
pub struct TrustPattern {
    pub name: String,
    pub pattern: Regex,
    pub target: MatchTarget,
}

impl TrustPattern {
    /// Compile a pattern.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        target: MatchTarget,
        case_insensitive: bool,
    ) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(Self {
            name: name.into(),
            pattern,
            target,
        })
    }

    fn matches(&self, url: &str, label: &str) -> bool {
        match self.target {
            MatchTarget::Url => self.pattern.is_match(url),
            MatchTarget::Host => Url::parse(url)
                .ok()
                .and_then(|u| u.host_str().map(|h| self.pattern.is_match(h)))
                .unwrap_or(false),
            MatchTarget::Label => self.pattern.is_match(label),
        }
    }
}

/// Ordered trust patterns. First match wins.
#[derive(Debug, Clone)]
pub struct TrustTable {
    patterns: Vec<TrustPattern>,
}

impl TrustTable {
    pub fn new(patterns: Vec<TrustPattern>) -> Self {
        Self { patterns }
    }

    /// Built-in trusted servers.
    #[must_use]
    pub fn defaults() -> Self {
        let builtin = [
            ("Pub-Dev", r"pub-.*?\.dev"),
            ("FSL Server", r"fsl\.gigabytes\.click"),
        ];
        let patterns = builtin
            .into_iter()
            .map(|(name, pattern)| {
                TrustPattern::new(name, pattern, MatchTarget::Url, true)
                    .expect("built-in trust pattern is valid")
            })
            .collect();
        Self { patterns }
    }

    /// First pattern matching this link, in declared order.
    pub fn first_match(&self, url: &str, label: &str) -> Option<&TrustPattern> {
        self.patterns.iter().find(|p| p.matches(url, label))
    }

    pub fn patterns(&self) -> &[TrustPattern] {
        &self.patterns
    }
}

impl Default for TrustTable {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Classifies listing anchors against an injected trust table.
#[derive(Debug, Clone, Default)]
pub struct LinkClassifier {
    trust: TrustTable,
}

impl LinkClassifier {
    pub fn new(trust: TrustTable) -> Self {
        Self { trust }
    }

    /// Classify one anchor found on the page at `base`.
    ///
    /// Returns `None` for excluded anchors and for anchors without a usable
    /// target.
    pub fn classify(&self, anchor: &Anchor, base: &Url) -> Option<Link> {
        if anchor.text.to_lowercase().contains(EXCLUDED_LABEL) {
            debug!(text = %anchor.text, "Skipping messaging-app link");
            return None;
        }

        let Some(absolute) = absolute_url(&anchor.href, base) else {
            debug!(href = %anchor.href, "Skipping anchor without a usable target");
            return None;
        };

        let url = storage::rewrite(absolute);
        let label = branding::normalize(&short_label(&anchor.text));

        let is_trusted = match self.trust.first_match(&url, &label) {
            Some(pattern) => {
                debug!(url = %url, pattern = %pattern.name, "Trusted link");
                true
            }
            None => false,
        };

        Some(Link {
            url,
            label,
            is_trusted,
        })
    }

    /// Classify anchors in order, dropping excluded ones.
    pub fn classify_all(&self, anchors: &[Anchor], base: &Url) -> Vec<Link> {
        anchors
            .iter()
            .filter_map(|anchor| self.classify(anchor, base))
            .collect()
    }
}

/// Absolute form of `href`, resolved against `base` when relative.
///
/// Only `http` and `https` targets are usable; `javascript:`, `mailto:` and
/// other schemes yield `None`.
fn absolute_url(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match Url::parse(href) {
        Ok(parsed) => is_web(&parsed).then(|| href.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => base
            .join(href)
            .ok()
            .filter(is_web)
            .map(|u| u.to_string()),
        Err(_) => None,
    }
}

fn is_web(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Bracketed segment of the anchor text, or the whole text with whitespace
/// collapsed.
pub fn short_label(text: &str) -> String {
    if let Some(inner) = BRACKETED
        .captures(text)
        .and_then(|caps| caps.get(1))
        .filter(|m| !m.as_str().is_empty())
    {
        return inner.as_str().trim().to_string();
    }
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}
