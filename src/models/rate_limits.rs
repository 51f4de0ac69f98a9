//! Rate limit snapshot.
//!
//! The service reports remaining credits in response headers. The client
//! keeps the most recent values it has seen.

use reqwest::header::HeaderMap;
use serde::Serialize;
use tracing::warn;

pub const HEADER_CLIENT_LIMIT: &str = "x-ratelimit-clientlimit";
pub const HEADER_CLIENT_REMAINING: &str = "x-ratelimit-clientremaining";
pub const HEADER_CLIENT_RESET: &str = "x-ratelimit-clientreset";
pub const HEADER_USER_LIMIT: &str = "x-ratelimit-userlimit";
pub const HEADER_USER_REMAINING: &str = "x-ratelimit-userremaining";
pub const HEADER_USER_RESET: &str = "x-ratelimit-userreset";
pub const HEADER_POST_LIMIT: &str = "x-post-rate-limit-limit";
pub const HEADER_POST_REMAINING: &str = "x-post-rate-limit-remaining";
pub const HEADER_POST_RESET: &str = "x-post-rate-limit-reset";

/// Daily application credits granted by the service
pub const DEFAULT_CLIENT_LIMIT: u64 = 12500;

/// Latest known rate limit state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimits {
    /// Application credits per day
    pub client_limit: u64,
    /// Application credits left today
    pub client_remaining: u64,
    /// When application credits reset
    pub client_reset: u64,
    /// Per-user credits, only reported on OAuth requests
    pub user_limit: Option<u64>,
    pub user_remaining: Option<u64>,
    /// When user credits reset (unix seconds)
    pub user_reset: Option<u64>,
    /// Upload quota, only reported on POST requests
    pub post_limit: Option<u64>,
    pub post_remaining: Option<u64>,
    /// Seconds until the upload quota resets
    pub post_reset: Option<u64>,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            client_limit: DEFAULT_CLIENT_LIMIT,
            client_remaining: DEFAULT_CLIENT_LIMIT,
            client_reset: 0,
            user_limit: None,
            user_remaining: None,
            user_reset: None,
            post_limit: None,
            post_remaining: None,
            post_reset: None,
        }
    }
}

impl RateLimits {
    /// Record every rate limit header present in `headers`
    pub fn update_from_headers(&mut self, headers: &HeaderMap) {
        if let Some(v) = header_u64(headers, HEADER_CLIENT_LIMIT) {
            self.client_limit = v;
        }
        if let Some(v) = header_u64(headers, HEADER_CLIENT_REMAINING) {
            self.client_remaining = v;
        }
        if let Some(v) = header_u64(headers, HEADER_CLIENT_RESET) {
            self.client_reset = v;
        }

        // User limits are only sent for OAuth requests
        if let Some(v) = header_u64(headers, HEADER_USER_LIMIT) {
            self.user_limit = Some(v);
        }
        if let Some(v) = header_u64(headers, HEADER_USER_REMAINING) {
            self.user_remaining = Some(v);
        }
        if let Some(v) = header_u64(headers, HEADER_USER_RESET) {
            self.user_reset = Some(v);
        }

        if let Some(v) = header_u64(headers, HEADER_POST_LIMIT) {
            self.post_limit = Some(v);
        }
        if let Some(v) = header_u64(headers, HEADER_POST_REMAINING) {
            self.post_remaining = Some(v);
        }
        if let Some(v) = header_u64(headers, HEADER_POST_RESET) {
            self.post_reset = Some(v);
        }
    }

    /// Whether any known credit pool is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.client_remaining == 0
            || self.user_remaining == Some(0)
            || self.post_remaining == Some(0)
    }

    /// Reset value to report when a request is refused for rate limiting
    pub fn reset_hint(headers: &HeaderMap) -> Option<u64> {
        header_u64(headers, HEADER_USER_RESET).or_else(|| header_u64(headers, HEADER_CLIENT_RESET))
    }
}

/// Parse a numeric header; malformed values are logged and ignored
pub(crate) fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    let raw = headers.get(name)?;
    match raw.to_str().ok().and_then(|s| s.trim().parse().ok()) {
        Some(v) => Some(v),
        None => {
            warn!(header = name, value = ?raw, "Ignoring malformed rate limit header");
            None
        }
    }
}
