//! URL and reference-path manipulation utilities.
//!
//! Helpers for telling remote references from build-relative ones, turning
//! references into fetchable URLs, and producing stable cache keys.

use url::Url;

use crate::error::FetchError;

/// True for references that point outside the build: `http://`, `https://` or `//host/...`
#[must_use]
pub fn is_remote_reference(reference: &str) -> bool {
    let lower = reference.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

/// Turn a remote reference into a URL that can be requested
///
/// Protocol-relative references are fetched over https.
pub fn to_fetchable_url(reference: &str) -> Result<String, FetchError> {
    let reference = reference.trim();
    let candidate = if reference.starts_with("//") {
        format!("https:{reference}")
    } else {
        reference.to_string()
    };

    match Url::parse(&candidate) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(parsed.to_string()),
        _ => Err(FetchError::InvalidUrl(reference.to_string())),
    }
}

/// Normalize URL for consistent cache key generation
///
/// Semantically identical URLs produce the same key: default ports are
/// removed, trailing slashes are trimmed (except root "/"), and the url
/// crate's serialization fixes percent-encoding.
#[must_use]
pub fn normalize_url_for_cache(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        log::warn!("Failed to parse URL for normalization: {url}");
        return url.to_string();
    };

    if let Some(port) = parsed.port() {
        let scheme = parsed.scheme();
        if (scheme == "http" && port == 80) || (scheme == "https" && port == 443) {
            let _ = parsed.set_port(None);
        }
    }

    let path = parsed.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(path.trim_end_matches('/'));
    }

    parsed.to_string()
}

/// Prefix an artifact name with the deployment base path
///
/// A single `/` separates the two when neither side provides one.
#[must_use]
pub fn join_base(base: &str, name: &str) -> String {
    if base.is_empty() {
        return name.to_string();
    }
    match (base.ends_with('/'), name.starts_with('/')) {
        (true, true) => format!("{base}{}", &name[1..]),
        (false, false) => format!("{base}/{name}"),
        _ => format!("{base}{name}"),
    }
}

/// Strip one leading `./` or `/` so `/app.js`, `./app.js` and `app.js` compare equal
///
/// Protocol-relative `//host/...` references are left untouched.
#[must_use]
pub fn strip_leading_separator(reference: &str) -> &str {
    if reference.starts_with("//") {
        return reference;
    }
    reference
        .strip_prefix("./")
        .or_else(|| reference.strip_prefix('/'))
        .unwrap_or(reference)
}
