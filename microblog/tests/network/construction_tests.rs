use super::support::*;

#[test]
fn sample_derives_expected_follow_relation() {
    let followers = derive_followers(&sample_posts()).expect("derive");
    let expected: FollowerMap = [
        ("a", "b"),
        ("b", "a"),
        ("c", "a b"),
        ("d", "b"),
        ("e", "b"),
        ("f", "d"),
        ("g", "d"),
        ("h", "b"),
    ]
    .into_iter()
    .map(|(user, followed)| (user.to_string(), names(followed)))
    .collect();
    assert_eq!(followers, expected);
}

#[test]
fn construction_matches_derivation() {
    let posts = sample_posts();
    let network = Network::from_posts(&posts).expect("network");
    assert_eq!(network.followers(), &derive_followers(&posts).unwrap());
    assert_eq!(network.post_count(), posts.len());
    assert_eq!(network.user_count(), 8);
    assert_eq!(
        network.users().collect::<Vec<_>>(),
        vec!["a", "b", "c", "d", "e", "f", "g", "h"]
    );
    assert_consistent(&network);
}

#[test]
fn derivation_ignores_order() {
    let posts = sample_posts();
    let expected = derive_followers(&posts).unwrap();

    let mut reversed = posts.clone();
    reversed.reverse();
    assert_eq!(derive_followers(&reversed).unwrap(), expected);

    let mut rotated = posts.clone();
    rotated.rotate_left(2);
    assert_eq!(derive_followers(&rotated).unwrap(), expected);
}

#[test]
fn duplicates_are_found_anywhere_in_the_list() {
    let mut posts = sample_posts();
    posts.push(posts[1].clone());
    assert_eq!(
        Network::from_posts(&posts).unwrap_err(),
        NetworkError::DuplicatePost { id: PostId::new(1) }
    );
}

#[test]
fn invalid_usernames_fail_construction() {
    let mut ids = PostIdAllocator::after(sample_posts().iter().map(Post::id));

    let mut posts = sample_posts();
    posts.push(post(&mut ids, ".", "testo", ""));
    assert_eq!(
        Network::from_posts(&posts).unwrap_err(),
        NetworkError::InvalidUsername {
            username: ".".to_string()
        }
    );

    let mut posts = sample_posts();
    posts[2].add_like("a!ice").unwrap();
    assert!(matches!(
        Network::from_posts(&posts),
        Err(NetworkError::InvalidUsername { .. })
    ));
}

#[test]
fn construction_copies_posts() {
    let mut posts = sample_posts();
    let network = Network::from_posts(&posts).unwrap();

    posts[0].add_like("zed").unwrap();
    posts[0].edit_text("changed outside").unwrap();

    let inside = network.get_post(posts[0].id()).unwrap();
    assert_eq!(inside.text(), "Hello World.");
    assert!(!inside.is_liked_by("zed"));
}

#[test]
fn returned_posts_are_independent_copies() {
    let network = sample_network();

    let mut copy = network.get_post(PostId::new(0)).unwrap();
    copy.add_like("zed").unwrap();
    copy.edit_text("mutated copy").unwrap();

    let mut written = network.written_by("b").unwrap();
    for post in &mut written {
        post.add_like("yolanda").unwrap();
    }

    let mut found = network.containing(&["hello"]).unwrap();
    found[0].edit_text("also mutated").unwrap();

    let again = network.get_post(PostId::new(0)).unwrap();
    assert_eq!(again.text(), "Hello World.");
    assert_eq!(again.likers(), &names("a c h"));
    assert!(network.written_by("b").unwrap().iter().all(|p| !p.is_liked_by("yolanda")));
    assert_consistent(&network);
}

#[test]
fn empty_list_builds_empty_network() {
    let network = Network::from_posts(&[]).unwrap();
    assert_eq!(network.user_count(), 0);
    assert_consistent(&network);
}
