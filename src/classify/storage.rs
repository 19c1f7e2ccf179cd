//! Storage-host URL rewriting
//!
//! Pixeldrain share pages (`/u/<id>`) render a viewer; the same file is served
//! directly from `/api/file/<id>`.

use url::Url;

/// Registrable label of the storage host. Mirrors exist under several TLDs.
pub const STORAGE_LABEL: &str = "pixeldrain";

/// `pixeldrain.<tld>` part of `host`, dropping any subdomain.
fn storage_domain(host: &str) -> Option<String> {
    let labels: Vec<&str> = host.split('.').collect();
    let at = labels
        .iter()
        .position(|label| label.eq_ignore_ascii_case(STORAGE_LABEL))?;
    if at + 1 >= labels.len() {
        return None;
    }
    Some(labels[at..].join("."))
}

/// Direct-file form of a storage share URL, if `url` is one.
pub fn direct_file_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let domain = storage_domain(parsed.host_str()?)?;

    let id = parsed
        .path()
        .strip_prefix("/u/")?
        .split('/')
        .next()
        .filter(|id| !id.is_empty())?;

    Some(format!("https://{domain}/api/file/{id}"))
}

/// Rewrite `url` to its direct-file form, or return it unchanged.
pub fn rewrite(url: String) -> String {
    direct_file_url(&url).unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_link_becomes_api_file() {
        assert_eq!(
            rewrite("https://pixeldrain.com/u/abc123".into()),
            "https://pixeldrain.com/api/file/abc123"
        );
    }

    #[test]
    fn other_tld_keeps_its_domain() {
        assert_eq!(
            rewrite("https://pixeldrain.dev/u/xyz?download".into()),
            "https://pixeldrain.dev/api/file/xyz"
        );
    }

    #[test]
    fn any_tld_mirror_is_rewritten() {
        assert_eq!(
            rewrite("https://pixeldrain.xyz/u/abc123".into()),
            "https://pixeldrain.xyz/api/file/abc123"
        );
        assert_eq!(
            rewrite("http://PixelDrain.net/u/q1#frag".into()),
            "https://pixeldrain.net/api/file/q1"
        );
    }

    #[test]
    fn lookalike_hosts_are_unchanged() {
        for url in [
            "https://notpixeldrain.com/u/abc123",
            "https://pixeldrain/u/abc123",
            "https://cdn.example/pixeldrain/u/abc123",
        ] {
            assert_eq!(rewrite(url.to_string()), url);
        }
    }

    #[test]
    fn subdomain_maps_to_canonical_host() {
        assert_eq!(
            rewrite("https://www.pixeldrain.com/u/id9".into()),
            "https://pixeldrain.com/api/file/id9"
        );
    }

    #[test]
    fn non_share_paths_are_unchanged() {
        for url in [
            "https://pixeldrain.com/api/file/abc123",
            "https://pixeldrain.com/l/list1",
            "https://pixeldrain.com/u/",
            "https://example.com/u/abc123",
            "/u/abc123",
        ] {
            assert_eq!(rewrite(url.to_string()), url);
        }
    }
}
