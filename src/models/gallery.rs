//! Gallery items.
//!
//! Gallery listings mix images and albums in one array. Each item carries an
//! `is_album` flag that selects its shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{de, AlbumInfo, ImageInfo};

/// One entry in a gallery listing or search result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GalleryItem {
    Image(ImageInfo),
    Album(AlbumInfo),
}

impl GalleryItem {
    /// Hash of the underlying image or album
    pub fn id(&self) -> &str {
        match self {
            Self::Image(image) => &image.id,
            Self::Album(album) => &album.id,
        }
    }

    /// Title of the underlying image or album
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Image(image) => image.title.as_deref(),
            Self::Album(album) => album.title.as_deref(),
        }
    }

    pub fn is_album(&self) -> bool {
        matches!(self, Self::Album(_))
    }

    pub fn as_image(&self) -> Option<&ImageInfo> {
        match self {
            Self::Image(image) => Some(image),
            Self::Album(_) => None,
        }
    }

    pub fn as_album(&self) -> Option<&AlbumInfo> {
        match self {
            Self::Album(album) => Some(album),
            Self::Image(_) => None,
        }
    }
}

/// Just the discriminating flag of a gallery item
#[derive(Deserialize)]
struct ItemKind {
    #[serde(default, deserialize_with = "de::flag")]
    is_album: bool,
}

impl<'de> Deserialize<'de> for GalleryItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = ItemKind::deserialize(&value).map_err(serde::de::Error::custom)?;

        if kind.is_album {
            serde_json::from_value(value)
                .map(Self::Album)
                .map_err(serde::de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(Self::Image)
                .map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_listing() {
        let items: Vec<GalleryItem> = serde_json::from_value(serde_json::json!([
            {"id": "img1", "is_album": false, "title": "an image", "type": "image/jpeg"},
            {"id": "alb1", "is_album": true, "title": "an album", "images_count": 3},
            {"id": "img2"},
            {"id": "alb2", "is_album": 1, "images_count": 2},
            {"id": "alb3", "is_album": "1", "images_count": "4"},
            {"id": "img3", "is_album": 0}
        ]))
        .unwrap();

        assert_eq!(items.len(), 6);
        assert!(!items[0].is_album());
        assert!(items[1].is_album());
        assert!(!items[2].is_album());
        assert_eq!(items[1].title(), Some("an album"));
        assert_eq!(items[1].as_album().and_then(|a| a.images_count), Some(3));
        assert_eq!(items[2].id(), "img2");

        assert_eq!(items[3].as_album().and_then(|a| a.images_count), Some(2));
        assert_eq!(items[4].as_album().and_then(|a| a.images_count), Some(4));
        assert_eq!(items[5].as_image().map(|i| i.id.as_str()), Some("img3"));
    }
}
