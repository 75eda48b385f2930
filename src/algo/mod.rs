//! Read-only traversal algorithms over the graph store
//!
//! Every function here takes `&GraphStore` and leaves mutation to the
//! repository layer. Costs are bounded: the recommenders only visit
//! directly-reachable neighborhoods and the explorer is depth- and
//! path-capped.

mod common;

pub mod collaborative;
pub mod explore;
pub mod friends;
pub mod stats;

pub use collaborative::{
    recommend_collaborative, CollaborativeParams, CollaborativeRecommendation,
};
pub use explore::{
    neighborhood, Subgraph, SubgraphEdge, SubgraphNode, MAX_DEPTH, MAX_PATHS, MIN_DEPTH,
};
pub use friends::{recommend_by_friends, FriendParams, FriendRecommendation};
pub use stats::{user_stats, UserStats};
