//! Data models for the Imgur API.
//!
//! This module contains the typed forms of every JSON payload the client
//! exchanges with the service, plus the query enums used to build paths.

mod account;
mod album;
mod comment;
pub(crate) mod de;
mod gallery;
mod media;
mod oauth;
mod query;
mod rate_limits;
mod response;

pub use account::*;
pub use album::*;
pub use comment::*;
pub use gallery::*;
pub use media::*;
pub use oauth::*;
pub use query::*;
pub use rate_limits::*;
pub use response::*;

use chrono::{DateTime, Utc};

/// Convert a unix timestamp from the service into a UTC datetime
pub(crate) fn timestamp(seconds: Option<i64>) -> Option<DateTime<Utc>> {
    seconds.and_then(|s| DateTime::from_timestamp(s, 0))
}
