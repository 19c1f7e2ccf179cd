//! Browser identification
//!
//! Gateway hosts reject clients that do not look like a desktop browser, so
//! every request carries the same Chrome-on-Windows identification. The
//! profile is fixed: it is never rotated or randomized per request.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

/// User-Agent sent with every fetch.
pub const USER_AGENT_STRING: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const ACCEPT_STRING: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_STRING: &str = "en-US,en;q=0.9";

/// Browser profile with a fixed fingerprint
#[derive(Debug, Clone, Copy)]
pub struct BrowserProfile {
    pub user_agent: &'static str,
    pub accept: &'static str,
    pub accept_language: &'static str,
}

/// The one profile this crate ever sends.
#[must_use]
pub fn chrome_profile() -> BrowserProfile {
    BrowserProfile {
        user_agent: USER_AGENT_STRING,
        accept: ACCEPT_STRING,
        accept_language: ACCEPT_LANGUAGE_STRING,
    }
}

impl BrowserProfile {
    /// Convert profile to reqwest `HeaderMap`
    ///
    /// Accept-Encoding is left to reqwest so it keeps transparent
    /// decompression.
    pub fn to_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(self.user_agent));
        headers.insert(ACCEPT, HeaderValue::from_static(self.accept));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(self.accept_language));
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_profile_is_stable() {
        let a = chrome_profile();
        let b = chrome_profile();
        assert_eq!(a.user_agent, b.user_agent);
        assert!(a.user_agent.contains("Chrome/91"));
    }

    #[test]
    fn headers_carry_user_agent() {
        let headers = chrome_profile().to_headers();
        assert_eq!(
            headers.get(USER_AGENT).and_then(|v| v.to_str().ok()),
            Some(USER_AGENT_STRING)
        );
        assert!(headers.get(ACCEPT).is_some());
        assert!(headers.get("accept-encoding").is_none());
    }
}
