//! Counting queries over a single user's adjacency

use crate::graph::{EdgeKind, GraphStore, NodeId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Distinct-neighbor counts for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub following_count: usize,
    pub follower_count: usize,
    pub rated_count: usize,
}

/// Count a user's distinct followees, followers, and rated products.
///
/// Counts neighbors, not edges, so a store that somehow carried
/// duplicate edges would still not be double-counted. A missing node
/// (or a product id) yields all zeroes rather than an error.
pub fn user_stats(store: &GraphStore, user: NodeId) -> UserStats {
    let is_user = store.get_node(user).is_some_and(|n| n.is_user());
    if !is_user {
        return UserStats::default();
    }

    let mut following = FxHashSet::default();
    let mut rated = FxHashSet::default();
    for edge in store.get_outgoing_edges(user) {
        match edge.kind {
            EdgeKind::Follows => {
                following.insert(edge.target);
            }
            EdgeKind::Rates { .. } => {
                rated.insert(edge.target);
            }
        }
    }

    let mut followers = FxHashSet::default();
    for edge in store.get_incoming_edges(user) {
        if edge.is_follows() {
            followers.insert(edge.source);
        }
    }

    UserStats {
        following_count: following.len(),
        follower_count: followers.len(),
        rated_count: rated.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RatingType;

    #[test]
    fn test_user_stats_counts_distinct_neighbors() {
        let mut store = GraphStore::new();
        let (alice, _) = store.upsert_user("Alice").unwrap();
        let (bob, _) = store.upsert_user("Bob").unwrap();
        let (charlie, _) = store.upsert_user("Charlie").unwrap();
        let (widget, _) = store.upsert_product("Widget", None).unwrap();
        let (anvil, _) = store.upsert_product("Anvil", None).unwrap();

        store.upsert_follow(alice, bob).unwrap();
        store.upsert_follow(alice, charlie).unwrap();
        store.upsert_follow(bob, alice).unwrap();
        store.upsert_rating(alice, widget, 5, RatingType::Recommends).unwrap();
        store.upsert_rating(alice, anvil, 2, RatingType::Discourages).unwrap();
        // Re-rating must not bump the count
        store.upsert_rating(alice, anvil, 3, RatingType::Rates).unwrap();

        let stats = user_stats(&store, alice);
        assert_eq!(stats.following_count, 2);
        assert_eq!(stats.follower_count, 1);
        assert_eq!(stats.rated_count, 2);
    }

    #[test]
    fn test_user_stats_missing_user_is_zero() {
        let store = GraphStore::new();
        assert_eq!(user_stats(&store, NodeId::new(99)), UserStats::default());
    }

    #[test]
    fn test_user_stats_product_id_is_zero() {
        let mut store = GraphStore::new();
        let (alice, _) = store.upsert_user("Alice").unwrap();
        let (widget, _) = store.upsert_product("Widget", None).unwrap();
        store.upsert_rating(alice, widget, 4, RatingType::Recommends).unwrap();

        assert_eq!(user_stats(&store, widget), UserStats::default());
    }
}
