use thiserror::Error;

use crate::id::PostId;

/// Top-level error type returned by network, post and report operations.
///
/// Every variant is locally recoverable: an operation that returns one of
/// these has not mutated any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// A required value was missing (an empty username, author or search word).
    #[error("missing required value: {what}")]
    InvalidInput { what: &'static str },

    /// Username fails the syntax rule.
    #[error("invalid username '{username}'")]
    InvalidUsername { username: String },

    /// Post text is empty or longer than the limit.
    #[error("invalid post text ({length} characters, expected 1..={max})")]
    InvalidText { length: usize, max: usize },

    /// Negative id, or a relation referencing a non-member.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("post {id} appears more than once")]
    DuplicatePost { id: PostId },

    #[error("user '{username}' already exists")]
    DuplicateUser { username: String },

    #[error("'{username}' already likes post {post}")]
    DuplicateLike { username: String, post: PostId },

    #[error("'{username}' already reported post {post}")]
    DuplicateReport { username: String, post: PostId },

    #[error("user '{username}' is not a member of the network")]
    AbsentUser { username: String },

    #[error("post {id} not found")]
    AbsentPost { id: PostId },

    #[error("'{username}' does not like post {post}")]
    AbsentLike { username: String, post: PostId },

    /// The author tried to like or unlike their own post.
    #[error("'{username}' cannot like their own post {post}")]
    SelfLike { username: String, post: PostId },

    /// The author tried to report their own post.
    #[error("'{username}' cannot report their own post {post}")]
    AuthorReport { username: String, post: PostId },
}

impl NetworkError {
    pub fn invalid_username(username: impl Into<String>) -> Self {
        Self::InvalidUsername {
            username: username.into(),
        }
    }

    pub fn absent_user(username: impl Into<String>) -> Self {
        Self::AbsentUser {
            username: username.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type NetworkResult<T> = Result<T, NetworkError>;

/// A broken structural invariant, reported by [`crate::Network::check_invariants`].
///
/// Seeing one of these outside a test means a mutator has a repair bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("'{username}' is in the follower index but not the post index")]
    MissingPostEntry { username: String },

    #[error("'{username}' is in the post index but not the follower index")]
    MissingFollowerEntry { username: String },

    #[error("'{username}' follows themselves")]
    SelfFollow { username: String },

    #[error("'{username}' follows '{followed}' who is not a member")]
    FollowsNonMember { username: String, followed: String },

    #[error("'{username}' follows '{followed}' without liking any of their posts")]
    UnwitnessedFollow { username: String, followed: String },

    #[error("post {post} is filed under '{filed_under}' but authored by '{author}'")]
    MisfiledPost {
        post: PostId,
        filed_under: String,
        author: String,
    },

    #[error("post {post} is liked by '{liker}' who is not a member")]
    LikerNotMember { post: PostId, liker: String },

    #[error("'{liker}' likes post {post} by '{author}' but does not follow them")]
    MissingFollow {
        post: PostId,
        liker: String,
        author: String,
    },

    #[error("post {post} is liked by its own author")]
    SelfLikedPost { post: PostId },

    #[error("post id {post} appears more than once")]
    DuplicatePostId { post: PostId },
}
