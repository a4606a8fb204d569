//! Follower derivation and influencer detection.

use std::collections::{BTreeMap, BTreeSet};

use log::trace;

use crate::errors::{NetworkError, NetworkResult};
use crate::post::{Post, ensure_distinct};
use crate::validators::check_username;

/// For each user, the set of users they follow.
pub type FollowerMap = BTreeMap<String, BTreeSet<String>>;

/// Derives the follow relation from the likes embedded in `posts`.
///
/// Every author and every liker gets an entry. A liker follows the author of
/// each post they liked. The whole list is validated before anything is built.
pub fn derive_followers(posts: &[Post]) -> NetworkResult<FollowerMap> {
    validate_posts(posts)?;

    let mut followers = FollowerMap::new();
    for post in posts {
        followers.entry(post.author().to_string()).or_default();
        for liker in post.likers() {
            followers
                .entry(liker.clone())
                .or_default()
                .insert(post.author().to_string());
        }
    }

    trace!(
        "derived follow relation for {} users from {} posts",
        followers.len(),
        posts.len()
    );
    Ok(followers)
}

/// Checks a raw post list: no repeated ids, every author and liker a valid
/// username.
pub(crate) fn validate_posts(posts: &[Post]) -> NetworkResult<()> {
    ensure_distinct(posts)?;
    for post in posts {
        check_username(post.author())?;
        for liker in post.likers() {
            check_username(liker)?;
        }
    }
    Ok(())
}

/// Users whose follower count strictly exceeds the number of users they follow.
///
/// The map must be closed: every followed user is itself a key and nobody
/// follows themselves, otherwise `InvalidArgument`.
pub fn influencers(followers: &FollowerMap) -> NetworkResult<Vec<String>> {
    for (user, followed) in followers {
        check_username(user)?;
        for target in followed {
            if target == user {
                return Err(NetworkError::invalid_argument(format!("'{user}' follows themselves")));
            }
            if !followers.contains_key(target) {
                return Err(NetworkError::invalid_argument(format!(
                    "'{user}' follows '{target}' who has no entry"
                )));
            }
        }
    }

    let mut follower_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for followed in followers.values() {
        for target in followed {
            *follower_counts.entry(target.as_str()).or_default() += 1;
        }
    }

    Ok(followers
        .iter()
        .filter(|(user, followed)| {
            follower_counts.get(user.as_str()).copied().unwrap_or(0) > followed.len()
        })
        .map(|(user, _)| user.clone())
        .collect())
}
