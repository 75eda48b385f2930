//! Node implementation for the recommendation graph
//!
//! A node is either a User or a Product; the kind is a closed variant
//! resolved by pattern match, with kind-specific fields kept on the
//! variant itself.

use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// The two node kinds the graph models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    User,
    Product {
        /// Optional catalogue grouping, set when the product is created.
        category: Option<String>,
    },
}

impl NodeKind {
    /// Renderer-facing label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::User => "User",
            NodeKind::Product { .. } => "Product",
        }
    }
}

/// A node in the recommendation graph
///
/// Nodes have:
/// - A unique ID (surrogate, used for adjacency indexing)
/// - A name (the natural key, unique within kind)
/// - A kind with kind-specific fields
/// - A creation timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Natural key, unique among nodes of the same kind
    pub name: String,

    /// User or Product
    pub kind: NodeKind,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl Node {
    /// Create a new User node
    pub fn new_user(id: NodeId, name: impl Into<String>) -> Self {
        Node {
            id,
            name: name.into(),
            kind: NodeKind::User,
            created_at: current_timestamp(),
        }
    }

    /// Create a new Product node
    pub fn new_product(id: NodeId, name: impl Into<String>, category: Option<&str>) -> Self {
        Node {
            id,
            name: name.into(),
            kind: NodeKind::Product {
                category: category.map(str::to_string),
            },
            created_at: current_timestamp(),
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self.kind, NodeKind::User)
    }

    pub fn is_product(&self) -> bool {
        matches!(self.kind, NodeKind::Product { .. })
    }

    /// Product category, if this is a Product that has one
    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Product { category } => category.as_deref(),
            NodeKind::User => None,
        }
    }
}

/// Get current timestamp
fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
