use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::NetworkError;

/// Identifier of a post. Assigned once at creation and never reused by the
/// allocator that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(u64);

impl PostId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PostId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Signed ids come from outside the crate (CLI arguments, foreign callers).
/// Negative values are rejected rather than wrapped.
impl TryFrom<i64> for PostId {
    type Error = NetworkError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        u64::try_from(raw)
            .map(Self)
            .map_err(|_| {
                NetworkError::invalid_argument(format!("post id must not be negative (got {raw})"))
            })
    }
}

/// Monotonic source of post ids.
///
/// Owned by whoever constructs posts: a [`crate::Network`] holds one, and
/// callers assembling a bulk post list hold their own.
#[derive(Debug, Clone, Default)]
pub struct PostIdAllocator {
    next: u64,
}

impl PostIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator whose first id is strictly greater than every id in `seen`.
    pub fn after<I>(seen: I) -> Self
    where
        I: IntoIterator<Item = PostId>,
    {
        let mut allocator = Self::new();
        for id in seen {
            allocator.observe(id);
        }
        allocator
    }

    /// Hands out the next id.
    pub fn allocate(&mut self) -> PostId {
        let id = PostId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> PostId {
        PostId(self.next)
    }

    /// Ensures `id` is never handed out again.
    pub fn observe(&mut self, id: PostId) {
        if id.0 >= self.next {
            self.next = id.0 + 1;
        }
    }
}
