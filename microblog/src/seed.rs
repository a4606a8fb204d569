//! Seed datasets: bulk post lists described as data.
//!
//! ```toml
//! [[posts]]
//! author = "b"
//! text = "Hello World."
//! likes = ["a", "c", "h"]
//! ```
//!
//! JSON with the same shape is accepted as well.

use serde::{Deserialize, Serialize};

use crate::errors::{NetworkError, NetworkResult};
use crate::id::PostIdAllocator;
use crate::network::Network;
use crate::post::Post;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub posts: Vec<SeedPost>,
}

/// One post record. Missing fields deserialize as `None` and are reported as
/// `InvalidInput` when the seed is turned into posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedPost {
    pub author: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub likes: Vec<String>,
}

impl SeedPost {
    pub fn new(author: &str, text: &str, likes: &[&str]) -> Self {
        Self {
            author: Some(author.to_string()),
            text: Some(text.to_string()),
            likes: likes.iter().map(|like| like.to_string()).collect(),
        }
    }
}

impl Seed {
    /// The five-post dataset used by the tour and as the CLI default.
    pub fn sample() -> Self {
        Self {
            posts: vec![
                SeedPost::new("b", "Hello World.", &["a", "c", "h"]),
                SeedPost::new("a", "You're welcome @alice!", &["b", "c"]),
                SeedPost::new("b", "@carlo @bob, see you tomorrow", &["a", "d", "e"]),
                SeedPost::new("d", "HI, how a are you?", &["f", "g"]),
                SeedPost::new("c", "Thanks @dario-until next time", &[]),
            ],
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Creates the posts in file order, taking ids from `ids`.
    ///
    /// Likes go through [`Post::add_like`], so self-likes and repeated likes
    /// in a record are rejected.
    pub fn into_posts(self, ids: &mut PostIdAllocator) -> NetworkResult<Vec<Post>> {
        let mut posts = Vec::with_capacity(self.posts.len());
        for record in self.posts {
            let author = record.author.ok_or(NetworkError::InvalidInput { what: "author" })?;
            let text = record.text.ok_or(NetworkError::InvalidInput { what: "text" })?;
            let mut post = Post::new(ids, author, text)?;
            for like in &record.likes {
                post.add_like(like)?;
            }
            posts.push(post);
        }
        Ok(posts)
    }

    /// Builds a fresh network from this dataset.
    pub fn into_network(self) -> NetworkResult<Network> {
        let posts = self.into_posts(&mut PostIdAllocator::new())?;
        Network::from_posts(&posts)
    }
}
