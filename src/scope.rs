// src/scope.rs
// =============================================================================
// Decides which URLs the crawler is allowed to visit.
//
// A URL is in scope when:
// 1. It parses and has a host (the "authority")
// 2. Its scheme is http or https
// 3. Its authority is exactly the seed's authority (no subdomain matching,
//    and the port is part of the authority)
// 4. Its path doesn't end with a known non-page extension (.pdf, .png, ...)
// 5. It doesn't contain admin/asset paths or special schemes anywhere
//
// Everything here is a pure function, which keeps it trivially testable.
// =============================================================================

use url::Url;

use crate::error::{Result, ScanError};

// File extensions that never lead to an HTML page
const SKIP_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".zip", ".rar", ".tar", ".gz",
    ".exe", ".dmg", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".ico", ".mp3", ".mp4", ".avi",
    ".mov", ".wmv", ".css", ".js", ".xml", ".rss",
];

// Substrings that mark admin areas, CMS assets or non-web links.
// Note that '#' means any URL with a fragment is rejected.
const SKIP_PATTERNS: &[&str] = &[
    "/wp-admin/",
    "/admin/",
    "/login/",
    "/logout/",
    "/wp-content/",
    "/wp-includes/",
    "mailto:",
    "tel:",
    "ftp:",
    "file:",
    "#",
    "javascript:",
];

/// Returns the authority (host plus explicit port) of a parsed URL.
///
/// `https://example.com:8443/a` -> `Some("example.com:8443")`
/// `mailto:someone@example.com` -> `None`
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

/// Parses a URL string and returns its authority, or an empty string when
/// there is none. Used where a missing authority simply never matches.
pub fn authority_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| authority(&parsed))
        .unwrap_or_default()
}

/// Checks whether `candidate` may be crawled for a site whose authority is
/// `allowed_authority`.
pub fn is_in_scope(candidate: &str, allowed_authority: &str) -> bool {
    let parsed = match Url::parse(candidate) {
        Ok(url) => url,
        Err(_) => return false,
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    match authority(&parsed) {
        Some(auth) if auth == allowed_authority => {}
        _ => return false,
    }

    let path = parsed.path().to_lowercase();
    if SKIP_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }

    let lowered = candidate.to_lowercase();
    !SKIP_PATTERNS.iter().any(|pattern| lowered.contains(pattern))
}

/// Turns user input into a seed URL.
///
/// Adds `https://` when no http(s) scheme is given, then requires a host.
///
/// Examples:
///   "example.com"          -> https://example.com/
///   "http://example.com/x" -> http://example.com/x
///   "https://"             -> InvalidSeedUrl
pub fn parse_seed(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ScanError::invalid_seed(input, "URL is empty"));
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| ScanError::invalid_seed(input, e.to_string()))?;

    if authority(&url).is_none() {
        return Err(ScanError::invalid_seed(input, "URL has no host"));
    }

    Ok(url)
}
