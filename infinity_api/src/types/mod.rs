mod meta;
pub use self::meta::{CommentsPage, Metadata, PaginationMetadata, PostsPage};

mod user;
pub use self::user::{Gender, User, UserID};

mod post;
pub use self::post::{Post, PostID, Reaction, ReactionCounts, ReactionKind};

mod comment;
pub use self::comment::{Comment, CommentID, CreateCommentRequest, UpdateCommentRequest};
