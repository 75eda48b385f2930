//! Shared helpers for the traversal algorithms

use crate::graph::{EdgeKind, GraphStore, NodeId};
use rustc_hash::FxHashMap;

/// All ratings issued by one user, keyed by product node.
///
/// The store guarantees at most one RATES edge per (user, product), so
/// the map is also the user's distinct rated-product set.
pub(crate) fn rated_products(store: &GraphStore, user: NodeId) -> FxHashMap<NodeId, u8> {
    let mut rated = FxHashMap::default();
    for edge in store.get_outgoing_edges(user) {
        if let EdgeKind::Rates { rating, .. } = edge.kind {
            rated.insert(edge.target, rating);
        }
    }
    rated
}
