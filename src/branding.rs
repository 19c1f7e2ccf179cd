//! Brand normalization for user-facing labels
//!
//! Mirror pages advertise themselves under competing or legacy names. Labels
//! shown to users carry the product's own brands instead. Replacement is
//! whole-word and case-insensitive; a match written entirely in lowercase gets
//! the lowercase spelling, anything else gets the canonical spelling.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

struct BrandingRule {
    pattern: Regex,
    canonical: &'static str,
    lowercase: &'static str,
}

impl BrandingRule {
    fn new(pattern: &str, canonical: &'static str, lowercase: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("branding pattern is valid"),
            canonical,
            lowercase,
        }
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            if matched == matched.to_lowercase() {
                self.lowercase
            } else {
                self.canonical
            }
        })
    }
}

// Order matters: joined and hyphenated spellings before spaced ones, and the
// camel-case `NextDrive` before the other joined spellings.
static RULES: LazyLock<Vec<BrandingRule>> = LazyLock::new(|| {
    vec![
        BrandingRule::new(r"(?i)\b(?:hub|v|n)-?cloud\b", "StreamScout", "streamscout"),
        BrandingRule::new(r"(?i)\b(?:hub|v|n) cloud\b", "Stream Scout", "stream scout"),
        BrandingRule::new(r"(?i)\bnext-drive\b", "Vlyx-Drive", "vlyx-drive"),
        BrandingRule::new(r"\bNextDrive\b", "Vlyx-Drive", "vlyx-drive"),
        BrandingRule::new(r"(?i)\bnextdrive\b", "Vlyxdrive", "vlyxdrive"),
        BrandingRule::new(r"(?i)\bnext drive\b", "Vlyx drive", "vlyx drive"),
    ]
});

/// Rewrite competing brand names in `text`.
pub fn normalize(text: &str) -> String {
    RULES
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc).into_owned())
}
