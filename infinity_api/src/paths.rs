//! Typed builders for content endpoint paths.
//!
//! Identifiers are checked once, when a [`ResourceId`] is created, so the
//! builders themselves cannot fail and never emit a path with an empty or
//! unescaped segment.

use std::fmt;

use uuid::Uuid;

use crate::Error;

/// `GET /news-feed`
pub const NEWS_FEED: &str = "/news-feed";

/// A path segment naming one resource.
///
/// Accepts non-empty strings made of ASCII letters, digits, `-`, `_`, `.`
/// and `~`, except the dot segments `.` and `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn parse(id: &str) -> Result<Self, Error> {
        let valid = !id.is_empty()
            && id != "."
            && id != ".."
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~'));
        if valid {
            Ok(Self(id.to_string()))
        } else {
            tracing::error!("Rejected resource id {:?}", id);
            Err(Error::InvalidId(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Uuid> for ResourceId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

impl std::str::FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `/posts/:postId/comments`
pub fn post_comments(post_id: &ResourceId) -> String {
    format!("/posts/{}/comments", post_id)
}

/// `/comments/:commentId/replies`
pub fn comment_replies(comment_id: &ResourceId) -> String {
    format!("/comments/{}/replies", comment_id)
}

/// `/comments/:commentId`
pub fn comment(comment_id: &ResourceId) -> String {
    format!("/comments/{}", comment_id)
}

/// `/users/:userId/posts`
pub fn user_posts(user_id: &ResourceId) -> String {
    format!("/users/{}/posts", user_id)
}
