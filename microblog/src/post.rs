//! Posts: an immutable identity with mutable text and a set of likers.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{NetworkError, NetworkResult};
use crate::id::{PostId, PostIdAllocator};
use crate::validators::check_text;

/// A short text authored by one user.
///
/// Equality, ordering and hashing look at the id only. `Clone` is the deep
/// copy: the clone owns its own liker set and keeps the original id.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    id: PostId,
    author: String,
    text: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    likers: BTreeSet<String>,
}

impl Post {
    /// Creates a post, taking the next id from `ids`.
    ///
    /// No id is consumed when validation fails.
    pub fn new(
        ids: &mut PostIdAllocator,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> NetworkResult<Self> {
        let author = author.into();
        let text = text.into();
        if author.is_empty() {
            return Err(NetworkError::InvalidInput { what: "author" });
        }
        check_text(&text)?;

        let now = Utc::now();
        Ok(Self {
            id: ids.allocate(),
            author,
            text,
            created_at: now,
            modified_at: now,
            likers: BTreeSet::new(),
        })
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn likers(&self) -> &BTreeSet<String> {
        &self.likers
    }

    pub fn is_liked_by(&self, username: &str) -> bool {
        self.likers.contains(username)
    }

    /// Replaces the text and refreshes `modified_at`.
    pub fn edit_text(&mut self, new_text: impl Into<String>) -> NetworkResult<()> {
        let new_text = new_text.into();
        check_text(&new_text)?;
        self.text = new_text;
        // Clock skew must not move modified_at behind created_at.
        self.modified_at = Utc::now().max(self.modified_at);
        Ok(())
    }

    pub fn add_like(&mut self, username: &str) -> NetworkResult<()> {
        self.check_liker(username)?;
        if self.likers.contains(username) {
            return Err(NetworkError::DuplicateLike {
                username: username.to_string(),
                post: self.id,
            });
        }
        self.likers.insert(username.to_string());
        Ok(())
    }

    pub fn remove_like(&mut self, username: &str) -> NetworkResult<()> {
        self.check_liker(username)?;
        if !self.likers.remove(username) {
            return Err(NetworkError::AbsentLike {
                username: username.to_string(),
                post: self.id,
            });
        }
        Ok(())
    }

    fn check_liker(&self, username: &str) -> NetworkResult<()> {
        if username.is_empty() {
            return Err(NetworkError::InvalidInput { what: "username" });
        }
        if username == self.author {
            return Err(NetworkError::SelfLike {
                username: username.to_string(),
                post: self.id,
            });
        }
        Ok(())
    }

    /// Removes `username` from the likers if present. Used by user deletion,
    /// where a missing like is not an error.
    pub(crate) fn discard_like(&mut self, username: &str) -> bool {
        self.likers.remove(username)
    }
}

/// Fails with `DuplicatePost` if any id occurs more than once anywhere in `posts`.
pub(crate) fn ensure_distinct(posts: &[Post]) -> NetworkResult<()> {
    let mut seen = HashSet::with_capacity(posts.len());
    for post in posts {
        if !seen.insert(post.id) {
            return Err(NetworkError::DuplicatePost { id: post.id });
        }
    }
    Ok(())
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Post {}

impl Hash for Post {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Post {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Post {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[id]        {}", self.id)?;
        writeln!(f, "[author]    {}", self.author)?;
        writeln!(f, "[created]   {}", self.created_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "[modified]  {}", self.modified_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        let likers: Vec<&str> = self.likers.iter().map(String::as_str).collect();
        writeln!(f, "[likes]     {}", likers.join(" "))?;
        write!(f, "[text]      {}", self.text)
    }
}
