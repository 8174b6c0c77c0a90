//! Posts and the reactions attached to them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

/// Unique identifier for a post.
pub type PostID = Uuid;

/// Count of reactions per kind. Kinds nobody used are absent.
pub type ReactionCounts = BTreeMap<ReactionKind, u64>;

/// A post in the news feed or on a profile.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostID,

    /// Author of the post.
    pub user: User,

    pub content: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub reaction_counts: ReactionCounts,

    /// The viewer's own reaction, if they reacted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user_reaction: Option<Reaction>,
}

impl Post {
    /// Sum of all reaction counts.
    pub fn total_reactions(&self) -> u64 {
        self.reaction_counts.values().sum()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: Uuid,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReactionKind {
    #[serde(rename = "like")]
    Like,

    #[serde(rename = "love")]
    Love,

    #[serde(rename = "haha")]
    Haha,

    #[serde(rename = "wow")]
    Wow,

    #[serde(rename = "sad")]
    Sad,

    #[serde(rename = "angry")]
    Angry,
}
impl ReactionKind {
    pub const ALL: &'static [ReactionKind] = &[
        ReactionKind::Like,
        ReactionKind::Love,
        ReactionKind::Haha,
        ReactionKind::Wow,
        ReactionKind::Sad,
        ReactionKind::Angry,
    ];
}
impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ReactionKind::Like => "like",
                ReactionKind::Love => "love",
                ReactionKind::Haha => "haha",
                ReactionKind::Wow => "wow",
                ReactionKind::Sad => "sad",
                ReactionKind::Angry => "angry",
            }
        )
    }
}
