//! Comments on posts and replies to comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PostID, User};

/// Unique identifier for a comment.
pub type CommentID = Uuid;

/// A top-level comment (`post_id` set) or a reply (`parent_id` set).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentID,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostID>,

    /// The comment this one replies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentID>,

    pub user: User,

    pub content: String,

    #[serde(default)]
    pub replies_count: u64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommentRequest {
    pub content: String,
}
