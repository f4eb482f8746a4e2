//! Host extraction from HTTP request headers.

use axum::http::{HeaderMap, header};

/// Returns the raw `Host` header, port included.
///
/// `None` if the header is missing or not valid UTF-8.
pub fn extract_host(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::HOST)?.to_str().ok()
}

/// Strips a trailing `:port` from a host, leaving IPv6 literals intact.
///
/// # Examples
///
/// ```
/// use subdomain_registrar::utils::extract_host::strip_port;
///
/// assert_eq!(strip_port("myblog.puter.site:8080"), "myblog.puter.site");
/// assert_eq!(strip_port("[::1]:8080"), "[::1]");
/// assert_eq!(strip_port("localhost"), "localhost");
/// ```
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    host.split(':').next().unwrap_or(host)
}
