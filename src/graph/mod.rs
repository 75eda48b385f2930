//! Typed property graph for the recommendation engine
//!
//! Nodes are Users or Products keyed by name; edges are FOLLOWS or
//! RATES relationships with upsert semantics. The store enforces the
//! uniqueness constraints and cascade-delete.

pub mod edge;
pub mod node;
pub mod store;
pub mod types;

pub use edge::{Edge, EdgeKind};
pub use node::{Node, NodeKind};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{
    EdgeId, NodeId, ParseRatingTypeError, RatingType, MAX_RATING, MIN_RATING,
};
