//! Friend-based recommendation
//!
//! Products recommended because users the origin follows rated them
//! highly: a one-hop FOLLOWS step to each friend, a one-hop RATES step
//! from the friend, then aggregation by product.

use super::common::rated_products;
use crate::graph::{EdgeKind, GraphStore, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Tuning knobs for the friend recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendParams {
    /// Minimum number of distinct recommending friends a product needs.
    pub min_friends: usize,
    /// Minimum rating for a friend's rating to count as a recommendation.
    pub min_rating: u8,
}

impl Default for FriendParams {
    fn default() -> Self {
        FriendParams {
            min_friends: 1,
            min_rating: 4,
        }
    }
}

/// One recommended product with the friends that back it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRecommendation {
    pub product: String,
    /// Number of distinct qualifying friends
    pub recommendation_count: usize,
    /// Names of those friends, ascending
    pub recommended_by: Vec<String>,
}

/// Recommend products rated `>= min_rating` by users the origin
/// follows, excluding anything the origin has already rated.
///
/// Results are ordered by recommendation count descending, product
/// name ascending as the tie-break, so equal counts always come out in
/// the same order.
pub fn recommend_by_friends(
    store: &GraphStore,
    user: NodeId,
    params: &FriendParams,
) -> Vec<FriendRecommendation> {
    let already_rated = rated_products(store, user);

    let mut backers: FxHashMap<NodeId, FxHashSet<NodeId>> = FxHashMap::default();
    for follow in store.get_outgoing_edges(user) {
        if !follow.is_follows() {
            continue;
        }
        let friend = follow.target;
        for rated in store.get_outgoing_edges(friend) {
            if let EdgeKind::Rates { rating, .. } = rated.kind {
                if rating >= params.min_rating && !already_rated.contains_key(&rated.target) {
                    backers.entry(rated.target).or_default().insert(friend);
                }
            }
        }
    }

    let mut recommendations: Vec<FriendRecommendation> = backers
        .into_iter()
        .filter(|(_, friends)| friends.len() >= params.min_friends)
        .filter_map(|(product_id, friends)| {
            let product = store.get_node(product_id)?.name.clone();
            let mut recommended_by: Vec<String> = friends
                .into_iter()
                .filter_map(|friend| store.get_node(friend))
                .map(|node| node.name.clone())
                .collect();
            recommended_by.sort();
            Some(FriendRecommendation {
                product,
                recommendation_count: recommended_by.len(),
                recommended_by,
            })
        })
        .collect();

    recommendations.sort_by(|a, b| {
        b.recommendation_count
            .cmp(&a.recommendation_count)
            .then_with(|| a.product.cmp(&b.product))
    });
    recommendations
}
