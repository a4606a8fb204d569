use super::support::*;

fn id(raw: u64) -> PostId {
    PostId::new(raw)
}

#[test]
fn create_user_adds_isolated_member() {
    let mut network = sample_network();
    network.create_user("zed").unwrap();

    assert!(network.is_member("zed"));
    assert_eq!(follows(&network, "zed"), names(""));
    assert!(network.written_by("zed").unwrap().is_empty());
    assert_eq!(network.user_count(), 9);
    assert_consistent(&network);
}

#[test]
fn create_user_rejects_bad_names() {
    let mut network = sample_network();
    assert_eq!(
        network.create_user("a"),
        Err(NetworkError::DuplicateUser {
            username: "a".to_string()
        })
    );
    assert_eq!(
        network.create_user("Zed"),
        Err(NetworkError::InvalidUsername {
            username: "Zed".to_string()
        })
    );
    assert_eq!(
        network.create_user(""),
        Err(NetworkError::InvalidInput { what: "username" })
    );
    assert_eq!(network.user_count(), 8);
}

#[test]
fn delete_user_removes_posts_likes_and_follows() {
    let mut network = sample_network();
    let removed = network.delete_user("b").unwrap();

    assert_eq!(ids_of(&removed), [id(0), id(2)].into_iter().collect());
    assert!(!network.is_member("b"));
    assert!(!network.get_post(id(1)).unwrap().is_liked_by("b"));
    for user in ["a", "c", "d", "e", "h"] {
        assert!(!follows(&network, user).contains("b"), "{user} still follows b");
    }
    assert_eq!(follows(&network, "c"), names("a"));
    assert_eq!(network.post_count(), 3);
    assert_consistent(&network);
}

#[test]
fn delete_user_requires_member() {
    let mut network = sample_network();
    assert_eq!(network.delete_user("zed"), Err(NetworkError::absent_user("zed")));
    assert!(matches!(
        network.delete_user("B"),
        Err(NetworkError::InvalidUsername { .. })
    ));
}

#[test]
fn create_post_assigns_fresh_id() {
    let mut network = sample_network();
    network.create_user("z").unwrap();
    let created = network.create_post("z", "First Post!").unwrap();

    assert_eq!(created, id(5));
    let post = network.get_post(created).unwrap();
    assert_eq!(post.author(), "z");
    assert!(post.likers().is_empty());
    assert_eq!(post.created_at(), post.modified_at());
    assert_consistent(&network);
}

#[test]
fn failed_create_post_consumes_no_id() {
    let mut network = sample_network();
    let too_long = "x".repeat(microblog::MAX_TEXT_LENGTH + 1);

    assert!(matches!(
        network.create_post("a", &too_long),
        Err(NetworkError::InvalidText { .. })
    ));
    assert!(matches!(
        network.create_post("a", ""),
        Err(NetworkError::InvalidText { length: 0, .. })
    ));
    assert_eq!(network.create_post("zed", "hi"), Err(NetworkError::absent_user("zed")));
    assert_eq!(
        network.create_post("", "hi"),
        Err(NetworkError::InvalidInput { what: "author" })
    );

    assert_eq!(network.create_post("a", "made it").unwrap(), id(5));
}

#[test]
fn text_at_the_limit_is_accepted() {
    let mut network = sample_network();
    let longest = "é".repeat(microblog::MAX_TEXT_LENGTH);
    let created = network.create_post("a", &longest).unwrap();
    assert_eq!(network.get_post(created).unwrap().text(), longest);
}

#[test]
fn delete_post_keeps_edges_with_another_witness() {
    let mut network = sample_network();
    let removed = network.delete_post(id(0)).unwrap();

    assert_eq!(removed.id(), id(0));
    assert_eq!(removed.likers(), &names("a c h"));
    // a also likes post 2 by b.
    assert_eq!(follows(&network, "a"), names("b"));
    assert_eq!(follows(&network, "c"), names("a"));
    assert_eq!(follows(&network, "h"), names(""));
    assert!(network.is_member("h"));
    assert_consistent(&network);
}

#[test]
fn delete_post_reports_absent_post() {
    let mut network = sample_network();
    assert_eq!(network.delete_post(id(42)), Err(NetworkError::AbsentPost { id: id(42) }));
    network.delete_post(id(3)).unwrap();
    assert_eq!(network.delete_post(id(3)), Err(NetworkError::AbsentPost { id: id(3) }));
}

#[test]
fn delete_all_posts_clears_followers_but_keeps_member() {
    let mut network = sample_network();
    let removed = network.delete_all_posts("b").unwrap();

    assert_eq!(ids_of(&removed), [id(0), id(2)].into_iter().collect());
    assert!(network.is_member("b"));
    assert!(network.written_by("b").unwrap().is_empty());
    assert!(network.followers().values().all(|following| !following.contains("b")));
    assert_eq!(follows(&network, "b"), names("a"));
    assert_consistent(&network);

    assert!(network.delete_all_posts("b").unwrap().is_empty());
}

#[test]
fn add_like_creates_follow() {
    let mut network = sample_network();
    network.add_like("h", id(3)).unwrap();

    assert!(network.get_post(id(3)).unwrap().is_liked_by("h"));
    assert_eq!(follows(&network, "h"), names("b d"));
    assert_consistent(&network);
}

#[test]
fn second_like_on_same_author_keeps_single_edge() {
    let mut network = sample_network();
    network.add_like("c", id(2)).unwrap();
    assert_eq!(follows(&network, "c"), names("a b"));

    network.remove_like("c", id(0)).unwrap();
    assert_eq!(follows(&network, "c"), names("a b"));

    network.remove_like("c", id(2)).unwrap();
    assert_eq!(follows(&network, "c"), names("a"));
    assert_consistent(&network);
}

#[test]
fn add_like_error_cases() {
    let mut network = sample_network();
    assert_eq!(
        network.add_like("d", id(3)),
        Err(NetworkError::SelfLike {
            username: "d".to_string(),
            post: id(3)
        })
    );
    assert_eq!(
        network.add_like("f", id(3)),
        Err(NetworkError::DuplicateLike {
            username: "f".to_string(),
            post: id(3)
        })
    );
    assert_eq!(network.add_like("zed", id(3)), Err(NetworkError::absent_user("zed")));
    assert_eq!(network.add_like("h", id(99)), Err(NetworkError::AbsentPost { id: id(99) }));
    assert!(matches!(
        network.add_like("Zed", id(3)),
        Err(NetworkError::InvalidUsername { .. })
    ));
}

#[test]
fn remove_like_drops_last_witness() {
    let mut network = sample_network();
    network.remove_like("f", id(3)).unwrap();

    assert!(!network.get_post(id(3)).unwrap().is_liked_by("f"));
    assert_eq!(follows(&network, "f"), names(""));
    assert!(network.is_member("f"));
    assert_consistent(&network);
}

#[test]
fn remove_like_error_cases() {
    let mut network = sample_network();
    assert_eq!(
        network.remove_like("h", id(3)),
        Err(NetworkError::AbsentLike {
            username: "h".to_string(),
            post: id(3)
        })
    );
    assert!(matches!(
        network.remove_like("b", id(0)),
        Err(NetworkError::SelfLike { .. })
    ));
    assert_eq!(network.remove_like("f", id(7)), Err(NetworkError::AbsentPost { id: id(7) }));
}

#[test]
fn like_then_unlike_restores_state() {
    let mut network = sample_network();
    let before = network.followers().clone();

    network.add_like("e", id(4)).unwrap();
    assert!(follows(&network, "e").contains("c"));
    network.remove_like("e", id(4)).unwrap();

    assert_eq!(network.followers(), &before);
    assert!(network.get_post(id(4)).unwrap().likers().is_empty());
}

#[test]
fn edit_post_keeps_likes_and_follows() {
    let mut network = sample_network();
    let before = network.followers().clone();
    let original = network.get_post(id(3)).unwrap();

    network.edit_post(id(3), "This is a very interesting post").unwrap();

    let edited = network.get_post(id(3)).unwrap();
    assert_eq!(edited.text(), "This is a very interesting post");
    assert_eq!(edited.likers(), original.likers());
    assert_eq!(edited.created_at(), original.created_at());
    assert!(edited.modified_at() >= original.modified_at());
    assert_eq!(network.followers(), &before);

    assert!(matches!(network.edit_post(id(3), ""), Err(NetworkError::InvalidText { .. })));
    assert_eq!(network.get_post(id(3)).unwrap().text(), "This is a very interesting post");
    assert_eq!(network.edit_post(id(50), "x"), Err(NetworkError::AbsentPost { id: id(50) }));
}

#[test]
fn failed_mutations_leave_state_untouched() {
    let mut network = sample_network();
    let followers = network.followers().clone();
    let likes: Vec<_> = network.all_posts().map(|post| post.likers().clone()).collect();

    let _ = network.add_like("d", id(3));
    let _ = network.add_like("a", id(0));
    let _ = network.remove_like("h", id(3));
    let _ = network.delete_user("zed");
    let _ = network.delete_post(id(9));
    let _ = network.create_user("b");
    let _ = network.create_post("a", "");

    assert_eq!(network.followers(), &followers);
    assert_eq!(
        network.all_posts().map(|post| post.likers().clone()).collect::<Vec<_>>(),
        likes
    );
    assert_eq!(network.post_count(), 5);
    assert_consistent(&network);
}
