//! Browser tab descriptors and the injection eligibility rule.

use serde::{Deserialize, Serialize};

pub type TabId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: TabId,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// URL prefixes of pages that never accept content scripts.
pub const RESTRICTED_URL_PREFIXES: &[&str] = &[
    "chrome://",
    "chrome-extension://",
    "chrome-search://",
    "edge://",
    "about:",
    "moz-extension://",
    "devtools://",
    "view-source:",
    "https://chrome.google.com/webstore",
];

/// Whether a content script may be injected into a tab with this URL.
///
/// Tabs without a URL are treated as unsupported.
pub fn is_url_supported(url: Option<&str>, extra_restricted: &[String]) -> bool {
    let Some(url) = url else {
        return false;
    };
    let url = url.trim();
    if url.is_empty() {
        return false;
    }
    !RESTRICTED_URL_PREFIXES
        .iter()
        .copied()
        .chain(extra_restricted.iter().map(String::as_str))
        .any(|prefix| url.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_pages_are_supported() {
        assert!(is_url_supported(Some("https://example.com/form"), &[]));
        assert!(is_url_supported(Some("http://localhost:3000"), &[]));
    }

    #[test]
    fn internal_pages_are_restricted() {
        assert!(!is_url_supported(Some("chrome://settings"), &[]));
        assert!(!is_url_supported(Some("chrome-extension://abc/popup.html"), &[]));
        assert!(!is_url_supported(Some("about:blank"), &[]));
        assert!(!is_url_supported(None, &[]));
    }

    #[test]
    fn configured_prefixes_are_restricted() {
        let extra = vec!["https://intranet.local".to_string()];
        assert!(!is_url_supported(Some("https://intranet.local/page"), &extra));
    }
}
