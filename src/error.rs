//! Error types for the Imgur client.
//!
//! This module defines a unified error handling system using `thiserror`.
//! Every failure a caller can observe, local or remote, is an [`ImgurError`].
//!
//! # Error Categories
//!
//! - **Local errors**: invalid input, missing OAuth token, bad configuration.
//!   These are raised before any request leaves the process.
//! - **Remote errors**: non-2xx statuses reported by the service, mapped to
//!   dedicated variants for 401/403, 404 and 429.
//! - **Transport errors**: connection failures, timeouts, undecodable bodies.
//!
//! # Example
//!
//! ```rust,ignore
//! use asyncgur::{ImgurError, Result};
//!
//! fn check_hash(hash: &str) -> Result<()> {
//!     if hash.is_empty() {
//!         return Err(ImgurError::validation("image hash is empty"));
//!     }
//!     Ok(())
//! }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias using ImgurError
pub type Result<T> = std::result::Result<T, ImgurError>;

/// Client error type
#[derive(Debug, Error)]
pub enum ImgurError {
    // -------------------------------------------------------------------------
    // Local Errors
    // -------------------------------------------------------------------------
    /// Invalid argument, rejected before sending
    #[error("Validation error: {0}")]
    Validation(String),

    /// Endpoint needs an OAuth access token and none is configured
    #[error("OAuth authentication required: {0}")]
    AuthRequired(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Remote Errors
    // -------------------------------------------------------------------------
    /// 401 or 403 from the service
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// 404 from the service
    #[error("Not found: {0}")]
    NotFound(String),

    /// 429 from the service
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        message: String,
        /// Reset value from the rate limit headers (unix seconds), if sent
        reset: Option<u64>,
    },

    /// Any other unsuccessful response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O error (reading upload files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImgurError {
    // -------------------------------------------------------------------------
    // Convenience constructors
    // -------------------------------------------------------------------------

    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an auth required error
    pub fn auth_required<S: Into<String>>(msg: S) -> Self {
        Self::AuthRequired(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a rate limit exceeded error
    pub fn rate_limit_exceeded<S: Into<String>>(msg: S, reset: Option<u64>) -> Self {
        Self::RateLimitExceeded {
            message: msg.into(),
            reset,
        }
    }

    /// Create an error from a remote status and message
    pub fn from_status<S: Into<String>>(status: StatusCode, msg: S) -> Self {
        let message = msg.into();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized {
                status: status.as_u16(),
                message,
            },
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded {
                message,
                reset: None,
            },
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Get the HTTP status code associated with this error, if any
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { status, .. } | Self::Api { status, .. } => {
                StatusCode::from_u16(*status).ok()
            }
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::RateLimitExceeded { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::Http(err) => err.status(),
            Self::Validation(_)
            | Self::AuthRequired(_)
            | Self::Config(_)
            | Self::Decode(_)
            | Self::Io(_) => None,
        }
    }

    /// Check if the service rejected the request (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_some_and(|s| s.is_client_error())
    }

    /// Check if the service failed (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_some_and(|s| s.is_server_error())
    }

    /// Whether repeating the same request later may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimitExceeded { .. } => true,
            Self::Http(err) => err.is_timeout() || err.is_connect() || self.is_server_error(),
            _ => self.is_server_error(),
        }
    }
}

impl From<ConfigError> for ImgurError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
