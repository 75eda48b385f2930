//! In-memory graph storage implementation
//!
//! The store owns the node and edge arenas, the kind-scoped name
//! uniqueness indexes, and the adjacency lists. All relationship
//! operations are upserts keyed by identity, so duplicate edges cannot
//! be created, and node deletion cascades to every incident edge.

use super::edge::{Edge, EdgeKind};
use super::node::{Node, NodeKind};
use super::types::{EdgeId, NodeId, RatingType, MAX_RATING, MIN_RATING};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("name must not be blank")]
    BlankName,

    #[error("a user cannot follow themselves")]
    SelfFollow,

    #[error("rating {0} is outside the allowed range 1..=5")]
    RatingOutOfRange(u8),

    #[error("neighborhood depth {0} is outside the allowed range 1..=3")]
    DepthOutOfRange(usize),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("node {0} has the wrong kind for this relationship")]
    KindMismatch(NodeId),

    #[error("uniqueness constraint violated: {0}")]
    ConstraintViolation(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Whether this error reports bad caller input, as opposed to a
    /// missing node or a store-side fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GraphError::BlankName
                | GraphError::SelfFollow
                | GraphError::RatingOutOfRange(_)
                | GraphError::DepthOutOfRange(_)
        )
    }
}

/// In-memory graph storage
///
/// Uses flat indexed tables for O(1) lookup performance:
/// - nodes / edges: id-indexed slot arenas with free-lists for reuse
/// - outgoing / incoming: NodeId -> Vec<EdgeId> adjacency lists
/// - users_by_name / products_by_name: the uniqueness indexes; a name
///   can map to at most one node per kind
/// - edge_by_pair: (source, target) -> EdgeId upsert index. The pair
///   alone identifies the edge kind because endpoints fix it (FOLLOWS
///   joins two Users, RATES joins a User to a Product).
#[derive(Debug)]
pub struct GraphStore {
    nodes: Vec<Option<Node>>,
    edges: Vec<Option<Edge>>,

    /// Outgoing edges for each node (adjacency list)
    outgoing: Vec<Vec<EdgeId>>,

    /// Incoming edges for each node (adjacency list)
    incoming: Vec<Vec<EdgeId>>,

    users_by_name: HashMap<String, NodeId>,
    products_by_name: HashMap<String, NodeId>,
    edge_by_pair: HashMap<(NodeId, NodeId), EdgeId>,

    /// Free node IDs for reuse
    free_node_ids: Vec<u64>,

    /// Free edge IDs for reuse
    free_edge_ids: Vec<u64>,

    /// Next node ID
    next_node_id: u64,

    /// Next edge ID
    next_edge_id: u64,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        GraphStore {
            nodes: Vec::with_capacity(256),
            edges: Vec::with_capacity(1024),
            outgoing: Vec::with_capacity(256),
            incoming: Vec::with_capacity(256),
            users_by_name: HashMap::new(),
            products_by_name: HashMap::new(),
            edge_by_pair: HashMap::new(),
            free_node_ids: Vec::new(),
            free_edge_ids: Vec::new(),
            next_node_id: 1,
            next_edge_id: 1,
        }
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let raw = self.free_node_ids.pop().unwrap_or_else(|| {
            let id = self.next_node_id;
            self.next_node_id += 1;
            id
        });
        let idx = raw as usize;

        // Ensure storage capacity
        if idx >= self.nodes.len() {
            self.nodes.resize(idx + 1, None);
            self.outgoing.resize(idx + 1, Vec::new());
            self.incoming.resize(idx + 1, Vec::new());
        }

        NodeId::new(raw)
    }

    /// Get-or-create a User node keyed by trimmed name.
    ///
    /// Returns the node id and whether the node was created by this
    /// call. Calling twice with the same name is a no-op the second
    /// time.
    pub fn upsert_user(&mut self, name: &str) -> GraphResult<(NodeId, bool)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GraphError::BlankName);
        }
        if let Some(&id) = self.users_by_name.get(name) {
            return Ok((id, false));
        }

        let id = self.alloc_node_id();
        self.nodes[id.as_u64() as usize] = Some(Node::new_user(id, name));
        self.users_by_name.insert(name.to_string(), id);
        Ok((id, true))
    }

    /// Get-or-create a Product node keyed by trimmed name.
    ///
    /// The category is set on create only; an existing product keeps
    /// the category it was created with.
    pub fn upsert_product(
        &mut self,
        name: &str,
        category: Option<&str>,
    ) -> GraphResult<(NodeId, bool)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GraphError::BlankName);
        }
        if let Some(&id) = self.products_by_name.get(name) {
            return Ok((id, false));
        }

        let id = self.alloc_node_id();
        self.nodes[id.as_u64() as usize] = Some(Node::new_product(id, name, category));
        self.products_by_name.insert(name.to_string(), id);
        Ok((id, true))
    }

    /// Look up a User node by trimmed name
    pub fn user_id(&self, name: &str) -> Option<NodeId> {
        self.users_by_name.get(name.trim()).copied()
    }

    /// Look up a Product node by trimmed name
    pub fn product_id(&self, name: &str) -> Option<NodeId> {
        self.products_by_name.get(name.trim()).copied()
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.as_u64() as usize).and_then(Option::as_ref)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    /// Get an edge by ID
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_u64() as usize).and_then(Option::as_ref)
    }

    fn expect_user(&self, id: NodeId) -> GraphResult<()> {
        match self.get_node(id) {
            None => Err(GraphError::NodeNotFound(id)),
            Some(node) if !node.is_user() => Err(GraphError::KindMismatch(id)),
            Some(_) => Ok(()),
        }
    }

    fn expect_product(&self, id: NodeId) -> GraphResult<()> {
        match self.get_node(id) {
            None => Err(GraphError::NodeNotFound(id)),
            Some(node) if !node.is_product() => Err(GraphError::KindMismatch(id)),
            Some(_) => Ok(()),
        }
    }

    /// Upsert a FOLLOWS edge between two existing users.
    ///
    /// At most one FOLLOWS edge exists per ordered pair; following a
    /// user twice is a no-op the second time. Endpoints are never
    /// auto-created.
    pub fn upsert_follow(
        &mut self,
        follower: NodeId,
        followee: NodeId,
    ) -> GraphResult<(EdgeId, bool)> {
        if follower == followee {
            return Err(GraphError::SelfFollow);
        }
        self.expect_user(follower)?;
        self.expect_user(followee)?;

        if let Some(&eid) = self.edge_by_pair.get(&(follower, followee)) {
            return Ok((eid, false));
        }
        let eid = self.insert_edge(follower, followee, EdgeKind::Follows);
        Ok((eid, true))
    }

    /// Upsert a RATES edge from an existing user to an existing product.
    ///
    /// At most one RATES edge exists per (user, product); re-rating
    /// overwrites the rating and type on the existing edge rather than
    /// creating a second one.
    pub fn upsert_rating(
        &mut self,
        user: NodeId,
        product: NodeId,
        rating: u8,
        rating_type: RatingType,
    ) -> GraphResult<(EdgeId, bool)> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(GraphError::RatingOutOfRange(rating));
        }
        self.expect_user(user)?;
        self.expect_product(product)?;

        let kind = EdgeKind::Rates { rating, rating_type };
        if let Some(&eid) = self.edge_by_pair.get(&(user, product)) {
            match self.edges.get_mut(eid.as_u64() as usize).and_then(Option::as_mut) {
                Some(edge) => {
                    edge.kind = kind;
                    return Ok((eid, false));
                }
                None => {
                    return Err(GraphError::ConstraintViolation(format!(
                        "pair index references missing edge {eid}"
                    )))
                }
            }
        }
        let eid = self.insert_edge(user, product, kind);
        Ok((eid, true))
    }

    fn insert_edge(&mut self, source: NodeId, target: NodeId, kind: EdgeKind) -> EdgeId {
        let raw = self.free_edge_ids.pop().unwrap_or_else(|| {
            let id = self.next_edge_id;
            self.next_edge_id += 1;
            id
        });
        let idx = raw as usize;

        // Ensure storage capacity
        if idx >= self.edges.len() {
            self.edges.resize(idx + 1, None);
        }

        let eid = EdgeId::new(raw);
        self.outgoing[source.as_u64() as usize].push(eid);
        self.incoming[target.as_u64() as usize].push(eid);
        self.edge_by_pair.insert((source, target), eid);
        self.edges[idx] = Some(Edge::new(eid, source, target, kind));
        eid
    }

    /// Delete a node and all its incident edges, in both directions.
    ///
    /// The cascade happens entirely under this `&mut self` call, so no
    /// caller can observe the node gone while its edges remain.
    pub fn delete_node(&mut self, id: NodeId) -> GraphResult<Node> {
        let idx = id.as_u64() as usize;
        let node = self
            .nodes
            .get_mut(idx)
            .and_then(|slot| slot.take())
            .ok_or(GraphError::NodeNotFound(id))?;

        match &node.kind {
            NodeKind::User => self.users_by_name.remove(node.name.as_str()),
            NodeKind::Product { .. } => self.products_by_name.remove(node.name.as_str()),
        };

        // Remove all incident edges
        let outgoing_edges = std::mem::take(&mut self.outgoing[idx]);
        let incoming_edges = std::mem::take(&mut self.incoming[idx]);
        for eid in outgoing_edges.into_iter().chain(incoming_edges) {
            let _ = self.delete_edge(eid);
        }

        self.free_node_ids.push(id.as_u64());
        Ok(node)
    }

    /// Delete an edge
    pub fn delete_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let idx = id.as_u64() as usize;
        let edge = self
            .edges
            .get_mut(idx)
            .and_then(|slot| slot.take())
            .ok_or(GraphError::EdgeNotFound(id))?;

        // Remove from adjacency lists
        if let Some(adj) = self.outgoing.get_mut(edge.source.as_u64() as usize) {
            adj.retain(|&eid| eid != id);
        }
        if let Some(adj) = self.incoming.get_mut(edge.target.as_u64() as usize) {
            adj.retain(|&eid| eid != id);
        }

        self.edge_by_pair.remove(&(edge.source, edge.target));
        self.free_edge_ids.push(id.as_u64());
        Ok(edge)
    }

    /// Get all outgoing edges from a node
    pub fn get_outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.outgoing
            .get(node_id.as_u64() as usize)
            .map(|edge_ids| edge_ids.iter().filter_map(|&id| self.get_edge(id)).collect())
            .unwrap_or_default()
    }

    /// Get all incoming edges to a node
    pub fn get_incoming_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.incoming
            .get(node_id.as_u64() as usize)
            .map(|edge_ids| edge_ids.iter().filter_map(|&id| self.get_edge(id)).collect())
            .unwrap_or_default()
    }

    /// All user names in ascending lexicographic order
    pub fn user_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.users_by_name.keys().cloned().collect();
        names.sort();
        names
    }

    /// All product names in ascending lexicographic order
    pub fn product_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.products_by_name.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    /// Verify that the uniqueness indexes agree with the arenas.
    ///
    /// Idempotent; a disagreement means an upsert ran outside the
    /// atomic discipline and is reported as a constraint violation.
    pub fn check_constraints(&self) -> GraphResult<()> {
        for (name, &id) in &self.users_by_name {
            match self.get_node(id) {
                Some(node) if node.is_user() && node.name == *name => {}
                _ => {
                    return Err(GraphError::ConstraintViolation(format!(
                        "user index entry {name:?} does not match node {id}"
                    )))
                }
            }
        }
        for (name, &id) in &self.products_by_name {
            match self.get_node(id) {
                Some(node) if node.is_product() && node.name == *name => {}
                _ => {
                    return Err(GraphError::ConstraintViolation(format!(
                        "product index entry {name:?} does not match node {id}"
                    )))
                }
            }
        }
        if self.users_by_name.len() + self.products_by_name.len() != self.node_count() {
            return Err(GraphError::ConstraintViolation(
                "name indexes disagree with node count".to_string(),
            ));
        }
        for (&(source, target), &eid) in &self.edge_by_pair {
            match self.get_edge(eid) {
                Some(edge) if edge.source == source && edge.target == target => {}
                _ => {
                    return Err(GraphError::ConstraintViolation(format!(
                        "pair index entry {source} -> {target} does not match edge {eid}"
                    )))
                }
            }
        }
        if self.edge_by_pair.len() != self.edge_count() {
            return Err(GraphError::ConstraintViolation(
                "pair index disagrees with edge count".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
