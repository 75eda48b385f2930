//! Collaborative-filtering recommendation
//!
//! Products recommended because users with similar rating patterns
//! rated them highly. Runs in two stages: discover similar users by
//! comparing ratings on shared products, then aggregate what those
//! users rated highly and the origin has not rated at all.

use super::common::rated_products;
use crate::graph::{EdgeKind, GraphStore, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Tuning knobs for the collaborative recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborativeParams {
    /// Maximum rating difference on a shared product for the two
    /// ratings to count as agreement.
    pub similarity_threshold: u8,
    /// Minimum rating for a similar user's rating to count as a
    /// recommendation.
    pub min_rating: u8,
    /// Number of close-rated shared products required before another
    /// user counts as similar. One coincidental agreement is not
    /// evidence of shared taste.
    pub min_shared_products: usize,
}

impl Default for CollaborativeParams {
    fn default() -> Self {
        CollaborativeParams {
            similarity_threshold: 1,
            min_rating: 4,
            min_shared_products: 2,
        }
    }
}

/// One recommended product with the similar users that back it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborativeRecommendation {
    pub product: String,
    /// Number of distinct similar users recommending the product
    pub recommendation_weight: usize,
    /// Mean of their ratings, rounded to 2 decimal places
    pub average_rating: f64,
    /// Names of those users, ascending
    pub recommended_by_similar: Vec<String>,
}

/// Recommend products rated `>= min_rating` by users whose ratings
/// agree with the origin's on at least `min_shared_products` shared
/// products, excluding anything the origin has already rated.
///
/// Results are ordered by weight descending, average rating
/// descending, then product name ascending for reproducibility.
pub fn recommend_collaborative(
    store: &GraphStore,
    user: NodeId,
    params: &CollaborativeParams,
) -> Vec<CollaborativeRecommendation> {
    let my_ratings = rated_products(store, user);
    if my_ratings.is_empty() {
        return Vec::new();
    }

    // Stage 1: count shared close-rated products per candidate
    let mut agreements: FxHashMap<NodeId, usize> = FxHashMap::default();
    for (&product, &my_rating) in &my_ratings {
        for edge in store.get_incoming_edges(product) {
            if let EdgeKind::Rates { rating, .. } = edge.kind {
                if edge.source != user
                    && my_rating.abs_diff(rating) <= params.similarity_threshold
                {
                    *agreements.entry(edge.source).or_insert(0) += 1;
                }
            }
        }
    }
    let similar_users: Vec<NodeId> = agreements
        .into_iter()
        .filter(|&(_, shared)| shared >= params.min_shared_products)
        .map(|(other, _)| other)
        .collect();

    // Stage 2: aggregate their high ratings over products new to the origin
    #[derive(Default)]
    struct Backing {
        users: FxHashSet<NodeId>,
        rating_sum: u32,
    }

    let mut backings: FxHashMap<NodeId, Backing> = FxHashMap::default();
    for &other in &similar_users {
        for edge in store.get_outgoing_edges(other) {
            if let EdgeKind::Rates { rating, .. } = edge.kind {
                if rating >= params.min_rating && !my_ratings.contains_key(&edge.target) {
                    let backing = backings.entry(edge.target).or_default();
                    if backing.users.insert(other) {
                        backing.rating_sum += u32::from(rating);
                    }
                }
            }
        }
    }

    let mut recommendations: Vec<CollaborativeRecommendation> = backings
        .into_iter()
        .filter_map(|(product_id, backing)| {
            let product = store.get_node(product_id)?.name.clone();
            let mut recommended_by_similar: Vec<String> = backing
                .users
                .into_iter()
                .filter_map(|other| store.get_node(other))
                .map(|node| node.name.clone())
                .collect();
            recommended_by_similar.sort();
            let weight = recommended_by_similar.len();
            Some(CollaborativeRecommendation {
                product,
                recommendation_weight: weight,
                average_rating: round2(f64::from(backing.rating_sum) / weight as f64),
                recommended_by_similar,
            })
        })
        .collect();

    recommendations.sort_by(|a, b| {
        b.recommendation_weight
            .cmp(&a.recommendation_weight)
            .then_with(|| {
                b.average_rating
                    .partial_cmp(&a.average_rating)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.product.cmp(&b.product))
    });
    recommendations
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RatingType;

    fn rate(store: &mut GraphStore, user: NodeId, product: NodeId, rating: u8) {
        store
            .upsert_rating(user, product, rating, RatingType::Recommends)
            .unwrap();
    }

    /// Alice and Bob agree on two products; Bob also likes a third.
    fn two_shared_setup() -> (GraphStore, NodeId, NodeId) {
        let mut store = GraphStore::new();
        let (alice, _) = store.upsert_user("Alice").unwrap();
        let (bob, _) = store.upsert_user("Bob").unwrap();
        let (p1, _) = store.upsert_product("Coffee Maker", None).unwrap();
        let (p2, _) = store.upsert_product("Blender", None).unwrap();
        let (p3, _) = store.upsert_product("Standing Desk", None).unwrap();

        rate(&mut store, alice, p1, 5);
        rate(&mut store, alice, p2, 4);
        rate(&mut store, bob, p1, 5);
        rate(&mut store, bob, p2, 4);
        rate(&mut store, bob, p3, 5);

        (store, alice, bob)
    }

    #[test]
    fn test_similar_user_recommendation() {
        let (store, alice, _) = two_shared_setup();

        let recs = recommend_collaborative(&store, alice, &CollaborativeParams::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].product, "Standing Desk");
        assert_eq!(recs[0].recommendation_weight, 1);
        assert_eq!(recs[0].average_rating, 5.0);
        assert_eq!(recs[0].recommended_by_similar, vec!["Bob"]);
    }

    #[test]
    fn test_one_shared_product_is_not_similarity() {
        let mut store = GraphStore::new();
        let (alice, _) = store.upsert_user("Alice").unwrap();
        let (bob, _) = store.upsert_user("Bob").unwrap();
        let (p1, _) = store.upsert_product("Coffee Maker", None).unwrap();
        let (p2, _) = store.upsert_product("Standing Desk", None).unwrap();

        rate(&mut store, alice, p1, 5);
        rate(&mut store, bob, p1, 5);
        rate(&mut store, bob, p2, 5);

        // Single agreement: Bob is not similar enough
        assert!(recommend_collaborative(&store, alice, &CollaborativeParams::default()).is_empty());

        // Lowering the gate to 1 shared product surfaces the recommendation
        let loose = CollaborativeParams { min_shared_products: 1, ..Default::default() };
        assert_eq!(recommend_collaborative(&store, alice, &loose).len(), 1);
    }

    #[test]
    fn test_disagreeing_ratings_do_not_count_as_shared() {
        let mut store = GraphStore::new();
        let (alice, _) = store.upsert_user("Alice").unwrap();
        let (bob, _) = store.upsert_user("Bob").unwrap();
        let (p1, _) = store.upsert_product("Coffee Maker", None).unwrap();
        let (p2, _) = store.upsert_product("Blender", None).unwrap();
        let (p3, _) = store.upsert_product("Standing Desk", None).unwrap();

        // One close pair, one far pair: still only one agreement
        rate(&mut store, alice, p1, 5);
        rate(&mut store, bob, p1, 4);
        rate(&mut store, alice, p2, 5);
        rate(&mut store, bob, p2, 1);
        rate(&mut store, bob, p3, 5);

        assert!(recommend_collaborative(&store, alice, &CollaborativeParams::default()).is_empty());
    }

    #[test]
    fn test_user_rated_products_are_excluded() {
        let (mut store, alice, bob) = two_shared_setup();
        let (p4, _) = store.upsert_product("Air Purifier", None).unwrap();
        rate(&mut store, bob, p4, 5);
        // Alice discourages it, so it must not come back as a recommendation
        store
            .upsert_rating(alice, p4, 1, RatingType::Discourages)
            .unwrap();

        let recs = recommend_collaborative(&store, alice, &CollaborativeParams::default());
        assert!(recs.iter().all(|r| r.product != "Air Purifier"));
    }

    #[test]
    fn test_average_rating_is_rounded() {
        let mut store = GraphStore::new();
        let (alice, _) = store.upsert_user("Alice").unwrap();
        let (bob, _) = store.upsert_user("Bob").unwrap();
        let (carol, _) = store.upsert_user("Carol").unwrap();
        let (dave, _) = store.upsert_user("Dave").unwrap();
        let (p1, _) = store.upsert_product("Coffee Maker", None).unwrap();
        let (p2, _) = store.upsert_product("Blender", None).unwrap();
        let (target, _) = store.upsert_product("Standing Desk", None).unwrap();

        // Everyone agrees with Alice on p1 and p2
        for user in [alice, bob, carol, dave] {
            rate(&mut store, user, p1, 5);
            rate(&mut store, user, p2, 4);
        }
        // 4 + 4 + 5 over three backers = 4.333...
        rate(&mut store, bob, target, 4);
        rate(&mut store, carol, target, 4);
        rate(&mut store, dave, target, 5);

        let recs = recommend_collaborative(&store, alice, &CollaborativeParams::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].recommendation_weight, 3);
        assert_eq!(recs[0].average_rating, 4.33);
        assert_eq!(recs[0].recommended_by_similar, vec!["Bob", "Carol", "Dave"]);
    }

    #[test]
    fn test_ordering_weight_then_average_then_name() {
        let mut store = GraphStore::new();
        let (alice, _) = store.upsert_user("Alice").unwrap();
        let (bob, _) = store.upsert_user("Bob").unwrap();
        let (carol, _) = store.upsert_user("Carol").unwrap();
        let (p1, _) = store.upsert_product("Coffee Maker", None).unwrap();
        let (p2, _) = store.upsert_product("Blender", None).unwrap();
        let (hi, _) = store.upsert_product("Standing Desk", None).unwrap();
        let (lo_a, _) = store.upsert_product("Air Purifier", None).unwrap();
        let (lo_b, _) = store.upsert_product("Vacuum Cleaner", None).unwrap();

        for user in [alice, bob, carol] {
            rate(&mut store, user, p1, 5);
            rate(&mut store, user, p2, 4);
        }
        // Weight 2 beats weight 1 regardless of rating
        rate(&mut store, bob, hi, 4);
        rate(&mut store, carol, hi, 4);
        // Equal weight 1, equal average: name ascending decides
        rate(&mut store, bob, lo_b, 5);
        rate(&mut store, carol, lo_a, 5);

        let recs = recommend_collaborative(&store, alice, &CollaborativeParams::default());
        let names: Vec<&str> = recs.iter().map(|r| r.product.as_str()).collect();
        assert_eq!(names, vec!["Standing Desk", "Air Purifier", "Vacuum Cleaner"]);
    }

    #[test]
    fn test_user_with_no_ratings_gets_nothing() {
        let mut store = GraphStore::new();
        let (alice, _) = store.upsert_user("Alice").unwrap();
        assert!(recommend_collaborative(&store, alice, &CollaborativeParams::default()).is_empty());
    }
}
