use super::support::*;
use microblog::{mentions, mentions_in};

#[test]
fn sample_influencers() {
    let network = sample_network();
    assert_eq!(network.influencers().unwrap(), vec!["a", "b", "d"]);
}

#[test]
fn liked_by_three_followers_is_influencer() {
    let mut ids = PostIdAllocator::new();
    let posts = vec![post(&mut ids, "a", "hello", "b c d")];
    let followers = derive_followers(&posts).unwrap();

    assert_eq!(influencers(&followers).unwrap(), vec!["a"]);
}

#[test]
fn balanced_users_are_not_influencers() {
    let mut ids = PostIdAllocator::new();
    let posts = vec![
        post(&mut ids, "a", "one", "b"),
        post(&mut ids, "b", "two", "a"),
    ];
    let network = Network::from_posts(&posts).unwrap();
    assert!(network.influencers().unwrap().is_empty());
}

#[test]
fn influencers_reject_open_maps() {
    let followers: FollowerMap = [("a".to_string(), names("ghost"))].into_iter().collect();
    assert!(matches!(
        influencers(&followers),
        Err(NetworkError::InvalidArgument { .. })
    ));

    let followers: FollowerMap = [("a".to_string(), names("a"))].into_iter().collect();
    assert!(matches!(
        influencers(&followers),
        Err(NetworkError::InvalidArgument { .. })
    ));

    let followers: FollowerMap = [("A".to_string(), names(""))].into_iter().collect();
    assert!(matches!(
        influencers(&followers),
        Err(NetworkError::InvalidUsername { .. })
    ));
}

#[test]
fn sample_mentions() {
    let network = sample_network();
    assert_eq!(network.mentioned_users(), names("alice bob carlo dario"));
    assert_eq!(mentions_in(&sample_posts()).unwrap(), names("alice bob carlo dario"));
}

#[test]
fn mentions_need_not_be_members() {
    let network = sample_network();
    assert!(!network.is_member("alice"));
    assert!(network.mentioned_users().contains("alice"));
}

#[test]
fn mention_boundaries() {
    let mut ids = PostIdAllocator::new();
    let cases = [
        ("ciao @bob, come stai?", "bob"),
        ("@Bob is not a username", ""),
        ("mail me at x@y_z.com", "y_z"),
        ("@@bob", "bob"),
        ("@a@b", "a b"),
        ("@ nobody", ""),
        ("@9lives nope", ""),
        ("end with @dario", "dario"),
    ];
    for (text, expected) in cases {
        let found = mentions(&post(&mut ids, "w", text, ""));
        assert_eq!(found, names(expected), "mentions in {text:?}");
    }
}

#[test]
fn mentions_reject_duplicate_ids() {
    let mut posts = sample_posts();
    posts.push(posts[4].clone());
    assert_eq!(
        mentions_in(&posts),
        Err(NetworkError::DuplicatePost { id: PostId::new(4) })
    );
}

#[test]
fn containing_matches_whole_words_ignoring_case() {
    let network = sample_network();

    let post_3: BTreeSet<PostId> = [PostId::new(3)].into_iter().collect();
    assert_eq!(ids_of(&network.containing(&["hi"]).unwrap()), post_3);
    assert_eq!(ids_of(&network.containing(&["a"]).unwrap()), post_3);
    assert_eq!(
        ids_of(&network.containing(&["HELLO", "tomorrow"]).unwrap()),
        [PostId::new(0), PostId::new(2)].into_iter().collect()
    );
    assert!(network.containing(&["hell"]).unwrap().is_empty());
}

#[test]
fn containing_does_not_match_inside_words() {
    let mut network = Network::new();
    network.create_user("w").unwrap();
    network.create_post("w", "this is great").unwrap();
    let hit = network.create_post("w", "oh-hi-there").unwrap();

    let found = network.containing(&["hi"]).unwrap();
    assert_eq!(ids_of(&found), [hit].into_iter().collect());
}

#[test]
fn containing_finds_phrase_after_overlapping_miss() {
    let mut network = Network::new();
    network.create_user("w").unwrap();
    let hit = network.create_post("w", "aha ha ha").unwrap();
    network.create_post("w", "ahaha ha").unwrap();

    let found = network.containing(&["ha ha"]).unwrap();
    assert_eq!(ids_of(&found), [hit].into_iter().collect());
}

#[test]
fn containing_treats_underscore_as_separator() {
    let mut network = Network::new();
    network.create_user("w").unwrap();
    let hit = network.create_post("w", "@hi_there").unwrap();
    network.create_post("w", "hi5").unwrap();

    let found = network.containing(&["hi"]).unwrap();
    assert_eq!(ids_of(&found), [hit].into_iter().collect());
}

#[test]
fn containing_edge_cases() {
    let network = sample_network();
    let no_words: [&str; 0] = [];
    assert!(network.containing(&no_words).unwrap().is_empty());
    assert_eq!(
        network.containing(&["hi", ""]),
        Err(NetworkError::InvalidInput { what: "search word" })
    );
}

#[test]
fn written_by_member() {
    let network = sample_network();
    let posts = network.written_by("b").unwrap();

    assert_eq!(ids_of(&posts), [PostId::new(0), PostId::new(2)].into_iter().collect());
    assert!(posts.iter().all(|post| post.author() == "b"));
    assert!(network.written_by("h").unwrap().is_empty());
    assert_eq!(network.written_by("zed"), Err(NetworkError::absent_user("zed")));
}

#[test]
fn written_by_in_validates_whole_list() {
    let posts = sample_posts();
    let found = Network::written_by_in(&posts, "d").unwrap();
    assert_eq!(ids_of(&found), [PostId::new(3)].into_iter().collect());
    assert!(Network::written_by_in(&posts, "zed").unwrap().is_empty());

    let mut duplicated = posts.clone();
    duplicated.push(posts[0].clone());
    assert_eq!(
        Network::written_by_in(&duplicated, "d"),
        Err(NetworkError::DuplicatePost { id: PostId::new(0) })
    );
    assert!(matches!(
        Network::written_by_in(&posts, "D"),
        Err(NetworkError::InvalidUsername { .. })
    ));
}
