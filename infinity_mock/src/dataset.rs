//! The virtual dataset behind the mock list endpoints.
//!
//! Nothing is stored. A collection is a key plus a size; the record at a
//! position is generated on demand. Without a seed every request draws
//! fresh records. With a seed, each collection key selects its own ChaCha
//! stream and each position its own slice of that stream, so overlapping
//! pages agree with each other.

use chrono::{DateTime, Utc};
use infinity_api::types::{Comment, Post, User};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::Totals;
use crate::generators::{CommentParent, Generator};
use crate::pagination::{paginate, Page};

const FEED_KEY: &str = "feed";
const VIEWER_KEY: &str = "viewer";

/// Keystream words reserved for one record.
const WORDS_PER_RECORD: u128 = 1 << 20;

#[derive(Debug, Clone)]
pub struct Dataset {
    seed: Option<u64>,
    anchor: DateTime<Utc>,
    totals: Totals,
}

impl Dataset {
    /// Creates a dataset whose timestamps are anchored at the current time.
    pub fn new(seed: Option<u64>, totals: Totals) -> Self {
        Self::with_anchor(seed, totals, Utc::now())
    }

    pub fn with_anchor(seed: Option<u64>, totals: Totals, anchor: DateTime<Utc>) -> Self {
        Self {
            seed,
            anchor,
            totals,
        }
    }

    /// The generator for the record at `position` in collection `key`.
    pub fn generator_at(&self, key: &str, position: u64) -> Generator<ChaCha8Rng> {
        let rng = match self.seed {
            Some(seed) => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(stream_for(key));
                rng.set_word_pos(u128::from(position) * WORDS_PER_RECORD);
                rng
            }
            None => ChaCha8Rng::from_entropy(),
        };
        Generator::new(rng, self.anchor)
    }

    /// Pages through collection `key`, generating each item from the
    /// generator for its absolute position.
    pub fn page<T>(
        &self,
        key: &str,
        total: u64,
        offset: u64,
        limit: u64,
        mut make: impl FnMut(&mut Generator<ChaCha8Rng>) -> T,
    ) -> Page<T> {
        let mut position = offset;
        paginate(total, offset, limit, || {
            let mut generator = self.generator_at(key, position);
            position += 1;
            make(&mut generator)
        })
    }

    /// Posts by many authors.
    pub fn news_feed(&self, offset: u64, limit: u64) -> Page<Post> {
        self.page(FEED_KEY, self.totals.feed_posts, offset, limit, |g| {
            let author = g.user();
            g.post(author)
        })
    }

    /// The profile of `user_id`. Stable across requests when seeded.
    pub fn user(&self, user_id: Uuid) -> User {
        let mut user = self.generator_at(&format!("user:{}", user_id), 0).user();
        user.id = user_id;
        user
    }

    /// Posts whose author is always `user_id`.
    pub fn user_posts(&self, user_id: Uuid, offset: u64, limit: u64) -> Page<Post> {
        let author = self.user(user_id);
        self.page(
            &format!("user:{}:posts", user_id),
            self.totals.profile_posts,
            offset,
            limit,
            |g| g.post(author.clone()),
        )
    }

    /// The signed-in user who writes comments.
    pub fn viewer(&self) -> User {
        self.generator_at(VIEWER_KEY, 0).user()
    }

    /// The account behind a sign-in, carrying the given email.
    pub fn account(&self, email: &str) -> User {
        let email = email.trim();
        let mut user = self
            .generator_at(&format!("account:{}", email.to_lowercase()), 0)
            .user();
        user.email = email.to_string();
        user
    }

    /// A comment the viewer has just posted on `post_id`.
    pub fn new_comment(&self, post_id: Uuid, content: String, now: DateTime<Utc>) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            post_id: Some(post_id),
            parent_id: None,
            user: self.viewer(),
            content,
            replies_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// The viewer's comment `comment_id` after an edit at `now`.
    pub fn edited_comment(&self, comment_id: Uuid, content: String, now: DateTime<Utc>) -> Comment {
        let mut generator = self.generator_at(&format!("comment:{}", comment_id), 0);
        let post_id = generator.uuid();
        let mut comment = generator.comment(CommentParent::Post(post_id), 0);
        comment.id = comment_id;
        comment.user = self.viewer();
        comment.content = content;
        comment.updated_at = now.max(comment.created_at);
        comment
    }

    pub fn post_comments(&self, post_id: Uuid, offset: u64, limit: u64) -> Page<Comment> {
        let replies = self.totals.replies;
        self.page(
            &format!("post:{}:comments", post_id),
            self.totals.comments,
            offset,
            limit,
            |g| g.comment(CommentParent::Post(post_id), replies),
        )
    }

    pub fn comment_replies(&self, comment_id: Uuid, offset: u64, limit: u64) -> Page<Comment> {
        self.page(
            &format!("comment:{}:replies", comment_id),
            self.totals.replies,
            offset,
            limit,
            |g| g.comment(CommentParent::Comment(comment_id), 0),
        )
    }
}

/// Maps an arbitrary path segment onto a UUID, keeping real UUIDs as they are.
pub fn uuid_for(segment: &str) -> Uuid {
    Uuid::parse_str(segment).unwrap_or_else(|_| {
        let digest = digest(segment);
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    })
}

/// The ChaCha stream that holds collection `key`.
fn stream_for(key: &str) -> u64 {
    let digest = digest(key);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

fn digest(text: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.finalize().into()
}
