//! Image entity model.
//!
//! `ImageInfo` is what the service returns for an uploaded image, a gallery
//! image, and each entry of an album's image list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

/// An image hosted by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Image hash, used in every image path
    pub id: String,

    /// Title, if one was set
    #[serde(default)]
    pub title: Option<String>,

    /// Description, if one was set
    #[serde(default)]
    pub description: Option<String>,

    /// Upload time (unix seconds)
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub datetime: Option<i64>,

    /// MIME type of the stored file
    #[serde(default, rename = "type")]
    pub mime_type: Option<String>,

    /// Whether the image is animated
    #[serde(default, deserialize_with = "de::flag")]
    pub animated: bool,

    /// Width in pixels
    #[serde(default, deserialize_with = "de::count")]
    pub width: u64,

    /// Height in pixels
    #[serde(default, deserialize_with = "de::count")]
    pub height: u64,

    /// File size in bytes
    #[serde(default, deserialize_with = "de::count")]
    pub size: u64,

    /// Number of views
    #[serde(default, deserialize_with = "de::count")]
    pub views: u64,

    /// Bandwidth consumed, in bytes
    #[serde(default, deserialize_with = "de::count")]
    pub bandwidth: u64,

    /// The current user's vote ("up", "down" or none)
    #[serde(default)]
    pub vote: Option<String>,

    /// Whether the current user favorited the image
    #[serde(default, deserialize_with = "de::flag")]
    pub favorite: bool,

    /// Whether the image is flagged not safe for work
    #[serde(default, deserialize_with = "de::flag")]
    pub nsfw: bool,

    /// Subreddit section for images pulled from reddit
    #[serde(default)]
    pub section: Option<String>,

    /// Username of the uploader, absent for anonymous uploads
    #[serde(default)]
    pub account_url: Option<String>,

    /// Account ID of the uploader
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub account_id: Option<u64>,

    #[serde(default, deserialize_with = "de::flag")]
    pub is_ad: bool,

    #[serde(default, deserialize_with = "de::flag")]
    pub in_most_viral: bool,

    #[serde(default, deserialize_with = "de::flag")]
    pub has_sound: bool,

    /// Tags attached in the gallery
    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default, deserialize_with = "de::opt_i64")]
    pub ad_type: Option<i64>,

    #[serde(default)]
    pub ad_url: Option<String>,

    /// Whether the image was edited after upload
    #[serde(default, deserialize_with = "de::flag")]
    pub edited: bool,

    /// Whether the image is submitted to the gallery
    #[serde(default, deserialize_with = "de::flag")]
    pub in_gallery: bool,

    /// Secret handle allowing anonymous deletion; only returned to the uploader
    #[serde(default)]
    pub deletehash: Option<String>,

    /// Original filename, only returned to the uploader
    #[serde(default)]
    pub name: Option<String>,

    /// Direct link to the file
    #[serde(default)]
    pub link: Option<String>,

    /// Link to the gifv version of an animated image
    #[serde(default)]
    pub gifv: Option<String>,

    /// Link to the mp4 version of an animated image
    #[serde(default)]
    pub mp4: Option<String>,
}

impl ImageInfo {
    /// Upload time as a UTC datetime
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        super::timestamp(self.datetime)
    }

    /// Whether the stored file is a video
    pub fn is_video(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with("video/"))
    }
}

/// A gallery tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "de::count")]
    pub followers: u64,

    #[serde(default, deserialize_with = "de::count")]
    pub total_items: u64,

    #[serde(default, deserialize_with = "de::flag")]
    pub following: bool,

    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_upload_response_data() {
        let image: ImageInfo = serde_json::from_value(serde_json::json!({
            "id": "orunSTu",
            "title": null,
            "description": null,
            "datetime": 1495556889,
            "type": "image/png",
            "animated": false,
            "width": 1,
            "height": 1,
            "size": 42,
            "views": 0,
            "bandwidth": 0,
            "vote": null,
            "favorite": false,
            "nsfw": null,
            "section": null,
            "account_url": null,
            "account_id": 0,
            "is_ad": false,
            "in_most_viral": false,
            "tags": [],
            "ad_type": 0,
            "ad_url": "",
            "in_gallery": false,
            "deletehash": "x70po4w7BVvSUzZ",
            "name": "",
            "link": "http://i.imgur.com/orunSTu.png"
        }))
        .unwrap();

        assert_eq!(image.id, "orunSTu");
        assert_eq!(image.mime_type.as_deref(), Some("image/png"));
        assert_eq!(image.size, 42);
        assert!(!image.nsfw);
        assert!(!image.is_video());
        assert_eq!(image.deletehash.as_deref(), Some("x70po4w7BVvSUzZ"));
        assert_eq!(
            image.created_at().map(|t| t.timestamp()),
            Some(1495556889)
        );
    }

    #[test]
    fn test_decode_minimal_image() {
        let image: ImageInfo = serde_json::from_str(r#"{"id": "abc", "edited": "1"}"#).unwrap();

        assert_eq!(image.id, "abc");
        assert!(image.edited);
        assert!(image.tags.is_empty());
        assert_eq!(image.created_at(), None);
    }
}
