pub(crate) use microblog::{
    FollowerMap, Network, NetworkError, Post, PostId, PostIdAllocator, derive_followers,
    influencers,
};
pub(crate) use std::collections::BTreeSet;

/// Builds a post with the given likers, e.g. `post(&mut ids, "b", "Hello", "a c")`.
pub(crate) fn post(ids: &mut PostIdAllocator, author: &str, text: &str, likers: &str) -> Post {
    let mut post = Post::new(ids, author, text).expect("valid post");
    for liker in likers.split_whitespace() {
        post.add_like(liker).expect("valid like");
    }
    post
}

/// The five posts the tour starts from (ids 0..=4).
pub(crate) fn sample_posts() -> Vec<Post> {
    let mut ids = PostIdAllocator::new();
    vec![
        post(&mut ids, "b", "Hello World.", "a c h"),
        post(&mut ids, "a", "You're welcome @alice!", "b c"),
        post(&mut ids, "b", "@carlo @bob, see you tomorrow", "a d e"),
        post(&mut ids, "d", "HI, how a are you?", "f g"),
        post(&mut ids, "c", "Thanks @dario-until next time", ""),
    ]
}

pub(crate) fn sample_network() -> Network {
    Network::from_posts(&sample_posts()).expect("sample is valid")
}

pub(crate) fn names(items: &str) -> BTreeSet<String> {
    items.split_whitespace().map(str::to_string).collect()
}

pub(crate) fn follows(network: &Network, user: &str) -> BTreeSet<String> {
    network.following(user).cloned().unwrap_or_default()
}

pub(crate) fn ids_of(posts: &[Post]) -> BTreeSet<PostId> {
    posts.iter().map(Post::id).collect()
}

pub(crate) fn assert_consistent(network: &Network) {
    if let Err(violation) = network.check_invariants() {
        panic!("invariant violated: {violation}");
    }
}
