//! The network aggregate.
//!
//! Two indices are kept side by side:
//!
//! - `followers`: for each member, the members they follow;
//! - `posts`: for each member, the posts they authored, keyed by id.
//!
//! A follow edge `u -> f` exists exactly when `u` likes at least one post by
//! `f`. The edge set is derived once at construction and afterwards repaired
//! incrementally by each mutator. [`Network::check_invariants`] verifies the
//! full contract and is what the tests lean on.
//!
//! Cross references are plain values (usernames and post ids), never pointers,
//! so posts and users can be removed without ownership cycles.

mod derive;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::debug;

use crate::errors::{InvariantViolation, NetworkError, NetworkResult};
use crate::id::{PostId, PostIdAllocator};
use crate::post::Post;
use crate::search;
use crate::validators::{check_text, check_username};

pub use derive::{FollowerMap, derive_followers, influencers};

/// For each author, their posts keyed by id.
pub type PostIndex = BTreeMap<String, BTreeMap<PostId, Post>>;

/// Users, their posts, and the follow relation derived from likes.
#[derive(Debug, Clone, Default)]
pub struct Network {
    followers: FollowerMap,
    posts: PostIndex,
    ids: PostIdAllocator,
}

impl Network {
    /// An empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a network from a bulk post list.
    ///
    /// Posts are copied in; the caller keeps its own. Every author and every
    /// liker becomes a member. New posts get ids above the largest one seen.
    pub fn from_posts(posts: &[Post]) -> NetworkResult<Self> {
        let followers = derive_followers(posts)?;

        let mut index = PostIndex::new();
        for post in posts {
            for liker in post.likers() {
                index.entry(liker.clone()).or_default();
            }
            index
                .entry(post.author().to_string())
                .or_default()
                .insert(post.id(), post.clone());
        }

        debug!("built network with {} users and {} posts", index.len(), posts.len());
        Ok(Self {
            followers,
            posts: index,
            ids: PostIdAllocator::after(posts.iter().map(Post::id)),
        })
    }

    // ------------------------------------------------------------------
    // Read views
    // ------------------------------------------------------------------

    /// Member usernames in ascending order.
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.followers.keys().map(String::as_str)
    }

    pub fn user_count(&self) -> usize {
        self.followers.len()
    }

    pub fn post_count(&self) -> usize {
        self.posts.values().map(BTreeMap::len).sum()
    }

    pub fn is_member(&self, username: &str) -> bool {
        self.followers.contains_key(username)
    }

    /// The follow relation.
    pub fn followers(&self) -> &FollowerMap {
        &self.followers
    }

    /// Users followed by `username`, if they are a member.
    pub fn following(&self, username: &str) -> Option<&BTreeSet<String>> {
        self.followers.get(username)
    }

    /// The post index.
    pub fn posts(&self) -> &PostIndex {
        &self.posts
    }

    /// Every post in the network, grouped by author.
    pub fn all_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values().flat_map(BTreeMap::values)
    }

    /// Independent copy of the post with `id`.
    pub fn get_post(&self, id: PostId) -> NetworkResult<Post> {
        self.canonical_post(id).cloned()
    }

    /// The network's own copy of the post with `id`.
    ///
    /// For collaborators that key state off post identity (reports).
    pub fn canonical_post(&self, id: PostId) -> NetworkResult<&Post> {
        self.posts
            .values()
            .find_map(|bucket| bucket.get(&id))
            .ok_or(NetworkError::AbsentPost { id })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Members followed by more users than they follow.
    pub fn influencers(&self) -> NetworkResult<Vec<String>> {
        influencers(&self.followers)
    }

    /// Valid usernames mentioned in any post of the network.
    pub fn mentioned_users(&self) -> BTreeSet<String> {
        self.all_posts().flat_map(search::mentions).collect()
    }

    /// Copies of every post authored by `username`.
    pub fn written_by(&self, username: &str) -> NetworkResult<Vec<Post>> {
        check_username(username)?;
        let bucket = self
            .posts
            .get(username)
            .ok_or_else(|| NetworkError::absent_user(username))?;
        Ok(bucket.values().cloned().collect())
    }

    /// Copies of the posts in `posts` authored by `username`.
    ///
    /// The whole list is validated first: no repeated ids and every author
    /// and liker a valid username.
    pub fn written_by_in(posts: &[Post], username: &str) -> NetworkResult<Vec<Post>> {
        check_username(username)?;
        derive::validate_posts(posts)?;
        Ok(posts
            .iter()
            .filter(|post| post.author() == username)
            .cloned()
            .collect())
    }

    /// Copies of the posts whose text contains at least one of `words` as a
    /// whole token, ignoring case.
    pub fn containing<S: AsRef<str>>(&self, words: &[S]) -> NetworkResult<Vec<Post>> {
        let words = search::normalize_words(words)?;
        if words.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .all_posts()
            .filter(|post| search::contains_any(post.text(), &words))
            .cloned()
            .collect())
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    pub fn create_user(&mut self, username: &str) -> NetworkResult<()> {
        check_username(username)?;
        if self.is_member(username) {
            return Err(NetworkError::DuplicateUser {
                username: username.to_string(),
            });
        }
        self.followers.insert(username.to_string(), BTreeSet::new());
        self.posts.insert(username.to_string(), BTreeMap::new());
        debug!("created user '{username}'");
        Ok(())
    }

    /// Removes a member and returns the posts they authored.
    ///
    /// Their likes disappear from other users' posts, and nobody follows them
    /// afterwards.
    pub fn delete_user(&mut self, username: &str) -> NetworkResult<Vec<Post>> {
        self.require_member(username)?;

        let followed = self.followers.remove(username).unwrap_or_default();
        for author in &followed {
            if let Some(bucket) = self.posts.get_mut(author) {
                for post in bucket.values_mut() {
                    post.discard_like(username);
                }
            }
        }
        for following in self.followers.values_mut() {
            following.remove(username);
        }
        let removed: Vec<Post> = self
            .posts
            .remove(username)
            .map(|bucket| bucket.into_values().collect())
            .unwrap_or_default();

        debug!("deleted user '{username}' with {} posts", removed.len());
        Ok(removed)
    }

    /// Publishes a new post and returns its id.
    pub fn create_post(&mut self, author: &str, text: &str) -> NetworkResult<PostId> {
        if author.is_empty() {
            return Err(NetworkError::InvalidInput { what: "author" });
        }
        check_text(text)?;
        self.require_member(author)?;

        let post = Post::new(&mut self.ids, author, text)?;
        let id = post.id();
        if let Some(bucket) = self.posts.get_mut(author) {
            bucket.insert(id, post);
        }
        debug!("'{author}' published post {id}");
        Ok(id)
    }

    /// Replaces the text of a post. Likes and follows are untouched.
    pub fn edit_post(&mut self, id: PostId, text: &str) -> NetworkResult<()> {
        self.post_mut(id)?.edit_text(text)?;
        debug!("edited post {id}");
        Ok(())
    }

    /// Removes a post and returns it.
    ///
    /// Former likers stop following the author unless another of the
    /// author's posts still carries their like.
    pub fn delete_post(&mut self, id: PostId) -> NetworkResult<Post> {
        let removed = self
            .posts
            .values_mut()
            .find_map(|bucket| bucket.remove(&id))
            .ok_or(NetworkError::AbsentPost { id })?;

        self.drop_unwitnessed_follows(removed.author(), removed.likers());
        debug!("deleted post {id} by '{}'", removed.author());
        Ok(removed)
    }

    /// Removes every post by `username` and returns them. The user stays a
    /// member but loses all followers.
    pub fn delete_all_posts(&mut self, username: &str) -> NetworkResult<Vec<Post>> {
        self.require_member(username)?;

        let removed = self
            .posts
            .insert(username.to_string(), BTreeMap::new())
            .unwrap_or_default();
        let likers: BTreeSet<&String> = removed.values().flat_map(Post::likers).collect();
        self.drop_unwitnessed_follows(username, likers);

        debug!("deleted all {} posts by '{username}'", removed.len());
        Ok(removed.into_values().collect())
    }

    /// `username` likes post `id` and from then on follows its author.
    pub fn add_like(&mut self, username: &str, id: PostId) -> NetworkResult<()> {
        self.require_member(username)?;

        let post = self.post_mut(id)?;
        post.add_like(username)?;
        let author = post.author().to_string();

        if let Some(following) = self.followers.get_mut(username) {
            following.insert(author);
        }
        debug!("'{username}' liked post {id}");
        Ok(())
    }

    /// `username` withdraws their like from post `id`. The follow edge to the
    /// author goes away only if no other post by that author is liked.
    pub fn remove_like(&mut self, username: &str, id: PostId) -> NetworkResult<()> {
        self.require_member(username)?;

        let post = self.post_mut(id)?;
        post.remove_like(username)?;
        let author = post.author().to_string();

        self.drop_unwitnessed_follows(&author, [username]);
        debug!("'{username}' unliked post {id}");
        Ok(())
    }

    fn require_member(&self, username: &str) -> NetworkResult<()> {
        check_username(username)?;
        if !self.is_member(username) {
            return Err(NetworkError::absent_user(username));
        }
        Ok(())
    }

    fn post_mut(&mut self, id: PostId) -> NetworkResult<&mut Post> {
        self.posts
            .values_mut()
            .find_map(|bucket| bucket.get_mut(&id))
            .ok_or(NetworkError::AbsentPost { id })
    }

    /// For each of `likers`, drops the follow edge to `author` when none of
    /// the author's remaining posts carries their like.
    fn drop_unwitnessed_follows<I>(&mut self, author: &str, likers: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let remaining = self.posts.get(author);
        for liker in likers {
            let liker = liker.as_ref();
            let witnessed = remaining
                .is_some_and(|bucket| bucket.values().any(|post| post.is_liked_by(liker)));
            if witnessed {
                continue;
            }
            if let Some(following) = self.followers.get_mut(liker)
                && following.remove(author)
            {
                debug!("'{liker}' no longer follows '{author}'");
            }
        }
    }

    // ------------------------------------------------------------------
    // Invariants
    // ------------------------------------------------------------------

    /// `true` when [`check_invariants`](Self::check_invariants) passes.
    pub fn is_consistent(&self) -> bool {
        self.check_invariants().is_ok()
    }

    /// Verifies the structural contract:
    ///
    /// 1. both indices have the same members;
    /// 2. every follow edge `u -> f` has `f != u`, `f` a member, and a post by
    ///    `f` liked by `u`;
    /// 3. every post is filed under its author, and each liker is a member
    ///    (not the author) who follows the author;
    /// 4. no post id appears twice.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for username in self.followers.keys() {
            if !self.posts.contains_key(username) {
                return Err(InvariantViolation::MissingPostEntry {
                    username: username.clone(),
                });
            }
        }
        for username in self.posts.keys() {
            if !self.followers.contains_key(username) {
                return Err(InvariantViolation::MissingFollowerEntry {
                    username: username.clone(),
                });
            }
        }

        for (username, following) in &self.followers {
            for followed in following {
                if followed == username {
                    return Err(InvariantViolation::SelfFollow {
                        username: username.clone(),
                    });
                }
                let Some(bucket) = self.posts.get(followed) else {
                    return Err(InvariantViolation::FollowsNonMember {
                        username: username.clone(),
                        followed: followed.clone(),
                    });
                };
                if !bucket.values().any(|post| post.is_liked_by(username)) {
                    return Err(InvariantViolation::UnwitnessedFollow {
                        username: username.clone(),
                        followed: followed.clone(),
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        for (username, bucket) in &self.posts {
            for (id, post) in bucket {
                if !seen.insert(*id) || *id != post.id() {
                    return Err(InvariantViolation::DuplicatePostId { post: *id });
                }
                if post.author() != username {
                    return Err(InvariantViolation::MisfiledPost {
                        post: post.id(),
                        filed_under: username.clone(),
                        author: post.author().to_string(),
                    });
                }
                for liker in post.likers() {
                    if liker == username {
                        return Err(InvariantViolation::SelfLikedPost { post: post.id() });
                    }
                    let Some(following) = self.followers.get(liker) else {
                        return Err(InvariantViolation::LikerNotMember {
                            post: post.id(),
                            liker: liker.clone(),
                        });
                    };
                    if !following.contains(username) {
                        return Err(InvariantViolation::MissingFollow {
                            post: post.id(),
                            liker: liker.clone(),
                            author: username.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
