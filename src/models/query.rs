//! Enumerations used as path segments and form values.
//!
//! Each enum displays as, and parses from, the exact string the service
//! expects on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ImgurError;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// All values, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ImgurError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| {
                        ImgurError::validation(format!(
                            "invalid {} '{}', expected one of: {}",
                            stringify!($name),
                            s,
                            Self::ALL
                                .iter()
                                .map(|v| v.as_str())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ))
                    })
            }
        }
    };
}

wire_enum! {
    /// Gallery section
    GallerySection {
        Hot => "hot",
        Top => "top",
        User => "user",
    }
    default Hot
}

wire_enum! {
    /// Gallery listing order
    GallerySort {
        Viral => "viral",
        Top => "top",
        Time => "time",
        /// Only meaningful for the user section
        Rising => "rising",
    }
    default Viral
}

wire_enum! {
    /// Gallery search order
    SearchSort {
        Time => "time",
        Viral => "viral",
        Top => "top",
    }
    default Time
}

wire_enum! {
    /// Time window for top-sorted listings
    TimeWindow {
        Day => "day",
        Week => "week",
        Month => "month",
        Year => "year",
        All => "all",
    }
    default Day
}

wire_enum! {
    /// Comment ordering
    CommentSort {
        Best => "best",
        Top => "top",
        New => "new",
    }
    default Best
}

wire_enum! {
    /// Album visibility
    AlbumPrivacy {
        Public => "public",
        Hidden => "hidden",
        Secret => "secret",
    }
    default Public
}

wire_enum! {
    /// Album presentation
    AlbumLayout {
        Blog => "blog",
        Grid => "grid",
        Horizontal => "horizontal",
        Vertical => "vertical",
    }
    default Blog
}

/// Result of toggling a favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteState {
    Favorited,
    Unfavorited,
}
