//! Album entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{de, ImageInfo};

/// An album of images.
///
/// Creating an album returns only `id` and `deletehash`, so every other
/// field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumInfo {
    /// Album hash
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Creation time (unix seconds)
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub datetime: Option<i64>,

    /// Hash of the cover image
    #[serde(default)]
    pub cover: Option<String>,

    #[serde(default, deserialize_with = "de::opt_u64")]
    pub cover_width: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_u64")]
    pub cover_height: Option<u64>,

    #[serde(default)]
    pub account_url: Option<String>,

    #[serde(default, deserialize_with = "de::opt_u64")]
    pub account_id: Option<u64>,

    /// "public", "hidden" or "secret"
    #[serde(default)]
    pub privacy: Option<String>,

    /// "blog", "grid", "horizontal" or "vertical"
    #[serde(default)]
    pub layout: Option<String>,

    #[serde(default, deserialize_with = "de::opt_u64")]
    pub views: Option<u64>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default, deserialize_with = "de::flag")]
    pub favorite: bool,

    #[serde(default, deserialize_with = "de::flag")]
    pub nsfw: bool,

    #[serde(default)]
    pub section: Option<String>,

    #[serde(default, deserialize_with = "de::opt_u64")]
    pub images_count: Option<u64>,

    /// Images in the album, present when the album itself was fetched
    #[serde(default)]
    pub images: Vec<ImageInfo>,

    #[serde(default, deserialize_with = "de::flag")]
    pub in_gallery: bool,

    /// Secret handle for anonymous albums
    #[serde(default)]
    pub deletehash: Option<String>,
}

impl AlbumInfo {
    /// Creation time as a UTC datetime
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        super::timestamp(self.datetime)
    }
}
