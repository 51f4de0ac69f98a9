//! Transport layer for the Imgur client.
//!
//! This module contains everything between the typed facade and the wire:
//! - Credential handling and the Authorization header
//! - Form and multipart payload construction
//! - Optional client-side request pacing
//! - The pooled HTTP transport with status and envelope handling

pub mod auth;
pub mod http;
pub mod payload;
pub mod throttle;

pub use auth::Credentials;
pub use http::Transport;
pub use payload::{AlbumPayload, CommentPayload, MediaSource, UploadPayload};
pub use throttle::Throttle;
