//! Recograph
//!
//! A graph-backed product recommendation engine. Users and products
//! live in a typed property graph with two relationship kinds:
//! FOLLOWS between users and RATES from a user to a product.
//! Recommendations come from two traversals over it: what the people
//! you follow rate highly, and what people who rate like you rate
//! highly. A bounded neighborhood extraction feeds external
//! visualization.
//!
//! # Architecture
//!
//! - [`graph`]: the typed node/edge store with uniqueness constraints
//!   and upsert (merge) semantics
//! - [`repo`]: the repository facade UI/glue talks to, adding
//!   validation, logging, and concurrent access over one shared store
//!   handle
//! - [`algo`]: read-only traversals for user stats, the two
//!   recommenders, and the neighborhood explorer
//!
//! # Example Usage
//!
//! ```rust
//! use recograph::{FriendParams, GraphRepository, RatingType};
//!
//! let repo = GraphRepository::new();
//! repo.add_user("Alice")?;
//! repo.add_user("Bob")?;
//! repo.add_product("Widget", Some("Gadgets"))?;
//!
//! repo.create_follow("Alice", "Bob")?;
//! repo.rate_product("Bob", "Widget", 5, RatingType::Recommends)?;
//!
//! let recs = repo.recommend_by_friends("Alice", &FriendParams::default())?;
//! assert_eq!(recs[0].product, "Widget");
//! assert_eq!(recs[0].recommended_by, vec!["Bob"]);
//! # Ok::<(), recograph::RepoError>(())
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod repo;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, EdgeKind, GraphError, GraphResult, GraphStore, Node, NodeId, NodeKind,
    ParseRatingTypeError, RatingType, MAX_RATING, MIN_RATING,
};

pub use repo::{GraphRepository, RepoError, RepoResult};

pub use algo::{
    neighborhood, recommend_by_friends, recommend_collaborative, user_stats,
    CollaborativeParams, CollaborativeRecommendation, FriendParams, FriendRecommendation,
    Subgraph, SubgraphEdge, SubgraphNode, UserStats, MAX_DEPTH, MAX_PATHS, MIN_DEPTH,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
