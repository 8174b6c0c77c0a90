use serde::{Deserialize, Serialize};

use super::{Comment, Post};

/// Where a page sits inside the full result set.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
    pub has_more: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub pagination: PaginationMetadata,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommentsPage {
    #[serde(alias = "items")]
    pub comments: Vec<Comment>,
    pub metadata: Metadata,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PostsPage {
    #[serde(alias = "items")]
    pub posts: Vec<Post>,
    pub metadata: Metadata,
}
