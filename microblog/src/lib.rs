//! Microblog core library.
//!
//! An in-memory social network: users, the posts they author, likes on those
//! posts, and a follow relation derived from who liked whom. The derived
//! relation is kept consistent with the likes by every mutator; see
//! [`Network::check_invariants`].
//!
//! ```
//! use microblog::{Network, NetworkError};
//!
//! let mut network = Network::new();
//! network.create_user("alice")?;
//! network.create_user("bob")?;
//! let post = network.create_post("alice", "hello @bob")?;
//! network.add_like("bob", post)?;
//!
//! assert!(network.following("bob").unwrap().contains("alice"));
//! assert!(network.mentioned_users().contains("bob"));
//! assert!(network.is_consistent());
//! # Ok::<(), NetworkError>(())
//! ```

pub mod errors;
pub mod examples;
pub mod id;
pub mod network;
pub mod post;
pub mod render;
pub mod reports;
pub mod search;
pub mod seed;
pub mod validators;

pub use errors::*;
pub use id::{PostId, PostIdAllocator};
pub use network::{FollowerMap, Network, PostIndex, derive_followers, influencers};
pub use post::Post;
pub use reports::{Report, ReportKind, ReportNetwork};
pub use search::{mentions, mentions_in};
pub use seed::{Seed, SeedPost};
pub use validators::{MAX_TEXT_LENGTH, MAX_USERNAME_LENGTH, is_valid_username};
