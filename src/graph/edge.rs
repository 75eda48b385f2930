//! Edge implementation for the recommendation graph
//!
//! Two directed relationship kinds exist: FOLLOWS between users and
//! RATES from a user to a product. The RATES payload (score and
//! qualitative type) lives on the kind variant, so an edge can never
//! carry a payload that does not belong to its kind.

use super::types::{EdgeId, NodeId, RatingType};
use serde::{Deserialize, Serialize};

/// The two relationship kinds, with kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// User -> User social edge
    Follows,
    /// User -> Product rating edge
    Rates {
        /// Score in 1..=5
        rating: u8,
        rating_type: RatingType,
    },
}

impl EdgeKind {
    /// Renderer-facing label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            EdgeKind::Follows => "FOLLOWS",
            EdgeKind::Rates { .. } => "RATES",
        }
    }
}

/// A directed edge in the recommendation graph
///
/// Edges have:
/// - A unique ID
/// - A source node (edge goes FROM this node)
/// - A target node
/// - A kind with kind-specific payload
/// - A creation timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// FOLLOWS or RATES, with payload
    pub kind: EdgeKind,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        Edge {
            id,
            source,
            target,
            kind,
            created_at: current_timestamp(),
        }
    }

    pub fn is_follows(&self) -> bool {
        matches!(self.kind, EdgeKind::Follows)
    }

    pub fn is_rates(&self) -> bool {
        matches!(self.kind, EdgeKind::Rates { .. })
    }

    /// Rating score, if this is a RATES edge
    pub fn rating(&self) -> Option<u8> {
        match self.kind {
            EdgeKind::Rates { rating, .. } => Some(rating),
            EdgeKind::Follows => None,
        }
    }

    /// Rating type, if this is a RATES edge
    pub fn rating_type(&self) -> Option<RatingType> {
        match self.kind {
            EdgeKind::Rates { rating_type, .. } => Some(rating_type),
            EdgeKind::Follows => None,
        }
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, node1: NodeId, node2: NodeId) -> bool {
        (self.source == node1 && self.target == node2)
            || (self.source == node2 && self.target == node1)
    }

    /// Check if this edge goes FROM a specific node
    pub fn starts_from(&self, node: NodeId) -> bool {
        self.source == node
    }

    /// Check if this edge goes TO a specific node
    pub fn ends_at(&self, node: NodeId) -> bool {
        self.target == node
    }

    /// Given one endpoint, return the opposite one.
    pub fn other_endpoint(&self, node: NodeId) -> NodeId {
        if self.source == node {
            self.target
        } else {
            self.source
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

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
