//! Deep-link keys
//!
//! Packs route parameters into one URL-safe opaque key: the JSON object of the
//! present fields, base64url-encoded without padding. Absent fields are
//! omitted; present fields, including empty strings, round-trip exactly.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Parameters carried by a drive deep link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeepLinkParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driveid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdbid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
}

impl DeepLinkParams {
    /// Encode into a URL-safe key.
    pub fn encode(&self) -> String {
        // Serializing a struct of optional strings cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decode a key, or `None` when it is malformed.
    ///
    /// Accepts both base64 alphabets, padded or not.
    pub fn decode(key: &str) -> Option<Self> {
        // Keys from standard-alphabet encoders (`+`, `/`, `=` padding) are
        // folded into the url-safe unpadded form first.
        let key: String = key
            .trim()
            .trim_end_matches('=')
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                c => c,
            })
            .collect();
        let bytes = URL_SAFE_NO_PAD.decode(key);

        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(error = %e, "Deep-link key is not base64url");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(params) => Some(params),
            Err(e) => {
                tracing::debug!(error = %e, "Deep-link key is not a parameter record");
                None
            }
        }
    }
}
