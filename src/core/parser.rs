//! Bluesky post URL validation and parsing

use crate::error::UrlError;
use crate::types::PostRef;
use once_cell::sync::Lazy;
use regex::Regex;

/// Substring every accepted post URL must contain
pub const HOST_MARKER: &str = "bsky.app";

static PROFILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/profile/([^/]+)").expect("Invalid regex"));
static POST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/post/([^/]+)").expect("Invalid regex"));

/// Check a raw URL before any processing starts.
///
/// Rules are applied in order: non-empty after trimming, contains the host
/// marker, contains both `/profile/` and `/post/`.
pub fn validate_post_url(url: &str) -> Result<(), UrlError> {
    if url.trim().is_empty() {
        return Err(UrlError::Empty);
    }
    if !url.contains(HOST_MARKER) {
        return Err(UrlError::WrongHost);
    }
    if !url.contains("/profile/") || !url.contains("/post/") {
        return Err(UrlError::WrongShape);
    }
    Ok(())
}

/// Extract the profile handle and post id; a missing segment yields ""
pub fn parse_post_url(url: &str) -> PostRef {
    let capture = |re: &Regex| {
        re.captures(url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    PostRef {
        username: capture(&PROFILE_RE),
        post_id: capture(&POST_RE),
    }
}

/// Whether a URL is worth queueing in a batch (looser than full validation)
pub fn is_batch_candidate(url: &str) -> bool {
    !url.trim().is_empty() && url.contains(HOST_MARKER)
}
