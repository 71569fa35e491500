//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters left as-is in query components (RFC 3986 unreserved)
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/posts/1") // -> "/blog/posts/1"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the origin
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/posts/1") // -> "https://example.com/blog/posts/1"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.origin(), url_for(config, path))
}

/// Whether a URL already carries a scheme or is protocol-relative
pub fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}

/// Resolve `path` against `origin`, leaving absolute URLs unchanged
///
/// # Examples
/// ```
/// use newsshare::helpers::absolute_url;
/// assert_eq!(absolute_url("https://example.com", "/img/x.png"), "https://example.com/img/x.png");
/// assert_eq!(absolute_url("https://example.com", "https://cdn.example.com/x.png"), "https://cdn.example.com/x.png");
/// ```
pub fn absolute_url(origin: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }

    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", origin, path)
    } else {
        format!("{}/{}", origin, path)
    }
}

/// Percent-encode a value for use inside a query string
pub fn encode_url(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}
