//! Comment entity model.
//!
//! Comments form a tree: replies are nested under `children`, to any depth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

/// A comment on a gallery image or album
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentInfo {
    #[serde(deserialize_with = "de::count")]
    pub id: u64,

    /// Hash of the image or album commented on
    pub image_id: String,

    /// Comment text
    pub comment: String,

    /// Author's username
    pub author: String,

    #[serde(default, deserialize_with = "de::count")]
    pub author_id: u64,

    /// Whether the comment is on an album rather than an image
    #[serde(default, deserialize_with = "de::flag")]
    pub on_album: bool,

    #[serde(default)]
    pub album_cover: Option<String>,

    #[serde(default, deserialize_with = "de::count")]
    pub ups: u64,

    #[serde(default, deserialize_with = "de::count")]
    pub downs: u64,

    /// ups minus downs
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub points: Option<i64>,

    /// Creation time (unix seconds)
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub datetime: Option<i64>,

    /// Parent comment ID; `0` or absent for a top-level comment
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub parent_id: Option<u64>,

    #[serde(default, deserialize_with = "de::flag")]
    pub deleted: bool,

    /// The current user's vote
    #[serde(default)]
    pub vote: Option<String>,

    /// Client platform the comment was posted from
    #[serde(default)]
    pub platform: Option<String>,

    /// Replies
    #[serde(default)]
    pub children: Vec<CommentInfo>,
}

impl CommentInfo {
    /// Whether this comment replies to another comment
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some_and(|id| id != 0)
    }

    /// Creation time as a UTC datetime
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        super::timestamp(self.datetime)
    }

    /// Depth-first iterator over this comment and all of its replies
    pub fn walk(&self) -> CommentWalk<'_> {
        CommentWalk { stack: vec![self] }
    }

    /// Number of comments in this subtree, including this one
    pub fn count(&self) -> usize {
        self.walk().count()
    }
}

/// Depth-first, pre-order traversal of a comment tree
#[derive(Debug)]
pub struct CommentWalk<'a> {
    stack: Vec<&'a CommentInfo>,
}

impl<'a> Iterator for CommentWalk<'a> {
    type Item = &'a CommentInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// Data returned when a comment is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedComment {
    #[serde(deserialize_with = "de::count")]
    pub id: u64,
}
