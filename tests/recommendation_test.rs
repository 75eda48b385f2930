use recograph::{
    CollaborativeParams, FriendParams, GraphRepository, RatingType,
};

/// Seed the scenario the product team uses as the acceptance check:
/// Alice follows Bob and Charlie, both of whom recommend Widget.
fn widget_scenario() -> GraphRepository {
    let repo = GraphRepository::new();
    for name in ["Alice", "Bob", "Charlie"] {
        repo.add_user(name).unwrap();
    }
    repo.add_product("Widget", None).unwrap();

    repo.create_follow("Alice", "Bob").unwrap();
    repo.create_follow("Alice", "Charlie").unwrap();
    repo.rate_product("Bob", "Widget", 5, RatingType::Recommends)
        .unwrap();
    repo.rate_product("Charlie", "Widget", 4, RatingType::Recommends)
        .unwrap();
    repo
}

#[test]
fn test_end_to_end_friend_recommendation() {
    let repo = widget_scenario();

    let params = FriendParams {
        min_friends: 2,
        min_rating: 4,
    };
    let recs = repo.recommend_by_friends("Alice", &params).unwrap();

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].product, "Widget");
    assert_eq!(recs[0].recommendation_count, 2);
    assert_eq!(recs[0].recommended_by, vec!["Bob", "Charlie"]);
}

#[test]
fn test_friend_recommendation_excludes_already_rated() {
    let repo = widget_scenario();
    // Alice rated Widget herself, even poorly: it must disappear
    repo.rate_product("Alice", "Widget", 2, RatingType::Discourages)
        .unwrap();

    let recs = repo
        .recommend_by_friends("Alice", &FriendParams::default())
        .unwrap();
    assert!(recs.is_empty());
}

#[test]
fn test_friend_recommendation_threshold_gates() {
    let repo = GraphRepository::new();
    for name in ["Alice", "Bob", "Charlie"] {
        repo.add_user(name).unwrap();
    }
    repo.add_product("Widget", None).unwrap();
    repo.create_follow("Alice", "Bob").unwrap();
    repo.create_follow("Alice", "Charlie").unwrap();
    repo.rate_product("Bob", "Widget", 5, RatingType::Recommends)
        .unwrap();

    let params = FriendParams {
        min_friends: 2,
        min_rating: 4,
    };
    assert!(repo.recommend_by_friends("Alice", &params).unwrap().is_empty());

    // The second qualifying friend unlocks the recommendation
    repo.rate_product("Charlie", "Widget", 4, RatingType::Recommends)
        .unwrap();
    assert_eq!(repo.recommend_by_friends("Alice", &params).unwrap().len(), 1);
}

#[test]
fn test_friend_recommendation_for_unknown_user_is_empty() {
    let repo = widget_scenario();
    let recs = repo
        .recommend_by_friends("Nobody", &FriendParams::default())
        .unwrap();
    assert!(recs.is_empty());
}

#[test]
fn test_friend_recommendation_deterministic_tie_break() {
    let repo = GraphRepository::new();
    for name in ["Alice", "Bob"] {
        repo.add_user(name).unwrap();
    }
    for product in ["Zeppelin", "Anvil", "Marble"] {
        repo.add_product(product, None).unwrap();
    }
    repo.create_follow("Alice", "Bob").unwrap();
    for product in ["Zeppelin", "Anvil", "Marble"] {
        repo.rate_product("Bob", product, 5, RatingType::Recommends)
            .unwrap();
    }

    let recs = repo
        .recommend_by_friends("Alice", &FriendParams::default())
        .unwrap();
    let names: Vec<&str> = recs.iter().map(|r| r.product.as_str()).collect();
    // Equal counts: name ascending decides
    assert_eq!(names, vec!["Anvil", "Marble", "Zeppelin"]);
}

#[test]
fn test_collaborative_similarity_gate() {
    let repo = GraphRepository::new();
    for name in ["Alice", "Bob"] {
        repo.add_user(name).unwrap();
    }
    for product in ["Laptop", "Tablet", "Smartwatch"] {
        repo.add_product(product, Some("Electronics")).unwrap();
    }

    // One shared close rating is not similarity
    repo.rate_product("Alice", "Laptop", 5, RatingType::Recommends)
        .unwrap();
    repo.rate_product("Bob", "Laptop", 5, RatingType::Recommends)
        .unwrap();
    repo.rate_product("Bob", "Smartwatch", 5, RatingType::Recommends)
        .unwrap();

    let recs = repo
        .recommend_collaborative("Alice", &CollaborativeParams::default())
        .unwrap();
    assert!(recs.is_empty());

    // A second shared product within the threshold makes Bob similar
    repo.rate_product("Alice", "Tablet", 4, RatingType::Recommends)
        .unwrap();
    repo.rate_product("Bob", "Tablet", 3, RatingType::Rates)
        .unwrap();

    let recs = repo
        .recommend_collaborative("Alice", &CollaborativeParams::default())
        .unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].product, "Smartwatch");
    assert_eq!(recs[0].recommendation_weight, 1);
    assert_eq!(recs[0].average_rating, 5.0);
    assert_eq!(recs[0].recommended_by_similar, vec!["Bob"]);
}

#[test]
fn test_collaborative_average_and_ordering() {
    let repo = GraphRepository::new();
    for name in ["Alice", "Bob", "Carol", "Dave"] {
        repo.add_user(name).unwrap();
    }
    for product in ["Laptop", "Tablet", "VR Headset", "Gaming Mouse"] {
        repo.add_product(product, None).unwrap();
    }

    // Bob, Carol, Dave all rate like Alice on two shared products
    for user in ["Alice", "Bob", "Carol", "Dave"] {
        repo.rate_product(user, "Laptop", 5, RatingType::Recommends)
            .unwrap();
        repo.rate_product(user, "Tablet", 4, RatingType::Recommends)
            .unwrap();
    }

    // VR Headset: weight 3, average (5 + 4 + 4) / 3 = 4.33
    repo.rate_product("Bob", "VR Headset", 5, RatingType::Recommends)
        .unwrap();
    repo.rate_product("Carol", "VR Headset", 4, RatingType::Recommends)
        .unwrap();
    repo.rate_product("Dave", "VR Headset", 4, RatingType::Recommends)
        .unwrap();
    // Gaming Mouse: weight 1
    repo.rate_product("Dave", "Gaming Mouse", 5, RatingType::Recommends)
        .unwrap();

    let recs = repo
        .recommend_collaborative("Alice", &CollaborativeParams::default())
        .unwrap();

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].product, "VR Headset");
    assert_eq!(recs[0].recommendation_weight, 3);
    assert_eq!(recs[0].average_rating, 4.33);
    assert_eq!(
        recs[0].recommended_by_similar,
        vec!["Bob", "Carol", "Dave"]
    );
    assert_eq!(recs[1].product, "Gaming Mouse");
    assert_eq!(recs[1].recommendation_weight, 1);
}

#[test]
fn test_collaborative_excludes_products_user_rated() {
    let repo = GraphRepository::new();
    for name in ["Alice", "Bob"] {
        repo.add_user(name).unwrap();
    }
    for product in ["Laptop", "Tablet", "Smartwatch"] {
        repo.add_product(product, None).unwrap();
    }

    for product in ["Laptop", "Tablet"] {
        repo.rate_product("Alice", product, 5, RatingType::Recommends)
            .unwrap();
        repo.rate_product("Bob", product, 5, RatingType::Recommends)
            .unwrap();
    }
    repo.rate_product("Bob", "Smartwatch", 5, RatingType::Recommends)
        .unwrap();
    // Alice already discouraged it; it must stay out
    repo.rate_product("Alice", "Smartwatch", 1, RatingType::Discourages)
        .unwrap();

    let recs = repo
        .recommend_collaborative("Alice", &CollaborativeParams::default())
        .unwrap();
    assert!(recs.is_empty());
}

#[test]
fn test_recommenders_reflect_deletes() {
    let repo = widget_scenario();

    repo.delete_user("Bob").unwrap();
    let params = FriendParams {
        min_friends: 2,
        min_rating: 4,
    };
    assert!(repo.recommend_by_friends("Alice", &params).unwrap().is_empty());

    // Charlie alone still clears the default threshold
    let recs = repo
        .recommend_by_friends("Alice", &FriendParams::default())
        .unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].recommended_by, vec!["Charlie"]);
}
