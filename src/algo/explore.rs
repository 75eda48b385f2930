//! Bounded-depth neighborhood extraction for visualization
//!
//! Enumerates undirected paths out of an origin node, up to a small
//! depth and a hard path cap, and flattens them into deduplicated node
//! and edge sets an external renderer can draw directly.

use crate::graph::{Edge, EdgeId, EdgeKind, GraphError, GraphResult, GraphStore, NodeId, NodeKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Shallowest allowed extraction depth.
pub const MIN_DEPTH: usize = 1;

/// Deepest allowed extraction depth.
pub const MAX_DEPTH: usize = 3;

/// Hard bound on traversed paths per extraction. Once the cap is hit,
/// no further paths are accepted; which paths are dropped is
/// unspecified.
pub const MAX_PATHS: usize = 200;

/// One node of the extracted subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Presentation hint: true only for the node the extraction
    /// started from, so a renderer can enlarge or recolor it.
    pub origin: bool,
}

/// One edge of the extracted subgraph. RATES edges keep their payload
/// so a renderer can build rating tooltips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
}

/// Deduplicated node/edge sets around an origin node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subgraph {
    pub nodes: Vec<SubgraphNode>,
    pub edges: Vec<SubgraphEdge>,
    /// Paths accepted before enumeration stopped.
    pub path_count: usize,
}

impl Subgraph {
    /// True when the extraction hit the path cap and may be partial.
    pub fn truncated(&self) -> bool {
        self.path_count >= MAX_PATHS
    }
}

/// Extract the undirected neighborhood of `origin` out to exactly
/// `depth` hops.
///
/// Both edge directions and both relationship kinds are followed.
/// Every relationship sequence of length `1..=depth` that does not
/// repeat a relationship within itself counts as one traversed path;
/// enumeration stops accepting paths at [`MAX_PATHS`]. Nodes are
/// emitted once by identity, edges once per `(source, target, kind)`.
pub fn neighborhood(store: &GraphStore, origin: NodeId, depth: usize) -> GraphResult<Subgraph> {
    if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        return Err(GraphError::DepthOutOfRange(depth));
    }
    let origin_node = store.get_node(origin).ok_or(GraphError::NodeNotFound(origin))?;

    let mut walker = Walker {
        store,
        nodes: IndexMap::new(),
        edges: IndexMap::new(),
        paths: 0,
    };
    walker.nodes.insert(
        origin,
        SubgraphNode {
            id: origin,
            name: origin_node.name.clone(),
            kind: origin_node.kind.clone(),
            origin: true,
        },
    );

    let mut path = Vec::with_capacity(depth);
    walker.walk(origin, depth, &mut path);

    Ok(Subgraph {
        nodes: walker.nodes.into_values().collect(),
        edges: walker.edges.into_values().collect(),
        path_count: walker.paths,
    })
}

struct Walker<'a> {
    store: &'a GraphStore,
    nodes: IndexMap<NodeId, SubgraphNode>,
    edges: IndexMap<(NodeId, NodeId, &'static str), SubgraphEdge>,
    paths: usize,
}

impl Walker<'_> {
    /// Depth-first path enumeration. `path` holds the relationships of
    /// the current path so none is reused within it.
    fn walk(&mut self, from: NodeId, remaining: usize, path: &mut Vec<EdgeId>) {
        if remaining == 0 {
            return;
        }
        let store = self.store;
        let outgoing = store.get_outgoing_edges(from);
        let incoming = store.get_incoming_edges(from);
        for edge in outgoing.into_iter().chain(incoming) {
            if self.paths >= MAX_PATHS {
                return;
            }
            if path.contains(&edge.id) {
                continue;
            }
            self.paths += 1;
            self.accept(edge);

            let next = edge.other_endpoint(from);
            path.push(edge.id);
            self.walk(next, remaining - 1, path);
            path.pop();
        }
    }

    fn accept(&mut self, edge: &Edge) {
        let store = self.store;
        for endpoint in [edge.source, edge.target] {
            if let Some(node) = store.get_node(endpoint) {
                self.nodes.entry(endpoint).or_insert_with(|| SubgraphNode {
                    id: endpoint,
                    name: node.name.clone(),
                    kind: node.kind.clone(),
                    origin: false,
                });
            }
        }
        self.edges
            .entry((edge.source, edge.target, edge.kind.label()))
            .or_insert_with(|| SubgraphEdge {
                source: edge.source,
                target: edge.target,
                kind: edge.kind.clone(),
            });
    }
}
