//! Random records for the mock API.
//!
//! [`Generator`] draws everything from the RNG it is given, so a seeded RNG
//! reproduces the same records and an entropy-seeded one does not.

use chrono::{DateTime, Duration, Utc};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use infinity_api::types::{
    Comment, Gender, Post, Reaction, ReactionCounts, ReactionKind, User,
};
use rand::Rng;
use uuid::Uuid;

/// Oldest generated post, in days before the anchor.
const MAX_POST_AGE_DAYS: i64 = 365;

/// Oldest generated comment, in days before the anchor.
const MAX_COMMENT_AGE_DAYS: i64 = 30;

const MIN_USER_AGE_YEARS: i64 = 18;
const MAX_USER_AGE_YEARS: i64 = 80;

/// Where a generated comment hangs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentParent {
    /// A top-level comment on a post.
    Post(Uuid),
    /// A reply to another comment.
    Comment(Uuid),
}

/// Produces users, posts, comments and reactions from an RNG.
///
/// Timestamps are placed before `anchor`, never after it.
pub struct Generator<R> {
    rng: R,
    anchor: DateTime<Utc>,
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R, anchor: DateTime<Utc>) -> Self {
        Self { rng, anchor }
    }

    /// A version 4 UUID built from the RNG's bytes.
    pub fn uuid(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }

    pub fn user(&mut self) -> User {
        let id = self.uuid();
        let first_name: String = FirstName().fake_with_rng(&mut self.rng);
        let last_name: String = LastName().fake_with_rng(&mut self.rng);
        let middle_name: Option<String> = if self.rng.gen_bool(0.5) {
            Some(FirstName().fake_with_rng(&mut self.rng))
        } else {
            None
        };
        let bio: String = Paragraph(1..3).fake_with_rng(&mut self.rng);
        let gender = Gender::ALL[self.rng.gen_range(0..Gender::ALL.len())];
        let age_days = self
            .rng
            .gen_range(MIN_USER_AGE_YEARS * 365..MAX_USER_AGE_YEARS * 365);
        let birthdate = (self.anchor - Duration::days(age_days))
            .date_naive()
            .format("%Y-%m-%d")
            .to_string();

        User {
            id,
            avatar: Some(format!("https://i.pravatar.cc/150?u={}", id)),
            cover: Some(format!("https://picsum.photos/seed/{}/1200/400", id.simple())),
            bio: Some(bio),
            first_name,
            last_name,
            middle_name,
            username: Username().fake_with_rng(&mut self.rng),
            email: SafeEmail().fake_with_rng(&mut self.rng),
            mobile_number: PhoneNumber().fake_with_rng(&mut self.rng),
            birthdate,
            gender,
            accept_terms: true,
        }
    }

    /// A post by `author`.
    pub fn post(&mut self, author: User) -> Post {
        let id = self.uuid();
        let created_at = self.before_anchor(Duration::days(MAX_POST_AGE_DAYS));
        let updated_at = self.between(created_at, self.anchor);
        let reaction_counts = self.reaction_counts();
        let current_user_reaction = if self.rng.gen_bool(0.5) {
            Some(self.reaction_after(created_at))
        } else {
            None
        };

        Post {
            id,
            user: author,
            content: Paragraph(1..4).fake_with_rng(&mut self.rng),
            created_at,
            updated_at,
            reaction_counts,
            current_user_reaction,
        }
    }

    /// A comment by a freshly generated user.
    pub fn comment(&mut self, parent: CommentParent, replies_count: u64) -> Comment {
        let id = self.uuid();
        let user = self.user();
        let created_at = self.before_anchor(Duration::days(MAX_COMMENT_AGE_DAYS));
        let updated_at = self.between(created_at, self.anchor);
        let (post_id, parent_id) = match parent {
            CommentParent::Post(post_id) => (Some(post_id), None),
            CommentParent::Comment(comment_id) => (None, Some(comment_id)),
        };

        Comment {
            id,
            post_id,
            parent_id,
            user,
            content: Sentence(3..16).fake_with_rng(&mut self.rng),
            replies_count,
            created_at,
            updated_at,
        }
    }

    /// Each kind is present about two times in three, with up to 500 reactions.
    pub fn reaction_counts(&mut self) -> ReactionCounts {
        let mut counts = ReactionCounts::new();
        for kind in ReactionKind::ALL {
            if self.rng.gen_ratio(2, 3) {
                counts.insert(*kind, self.rng.gen_range(1..=500));
            }
        }
        counts
    }

    fn reaction_after(&mut self, earliest: DateTime<Utc>) -> Reaction {
        let created_at = self.between(earliest, self.anchor);
        self.reaction_at(created_at)
    }

    fn reaction_at(&mut self, created_at: DateTime<Utc>) -> Reaction {
        let kind = ReactionKind::ALL[self.rng.gen_range(0..ReactionKind::ALL.len())];
        Reaction {
            id: self.uuid(),
            kind,
            created_at,
        }
    }

    /// A whole-second instant within `max_age` before the anchor.
    fn before_anchor(&mut self, max_age: Duration) -> DateTime<Utc> {
        let secs = self.rng.gen_range(0..=max_age.num_seconds().max(0));
        self.anchor - Duration::seconds(secs)
    }

    fn between(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
        let span = (end - start).num_seconds().max(0);
        start + Duration::seconds(self.rng.gen_range(0..=span))
    }
}
