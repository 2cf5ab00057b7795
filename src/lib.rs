//! Rivers
//!
//! An in-memory directed multigraph of named nodes with neighbour lookup in
//! both directions.
//!
//! Each node owns an outgoing and an incoming [`AdjacencyView`]. The graph
//! owns the canonical edge set and mediates every structural change, so an
//! edge is always visible from all three places (canonical set, source's
//! outgoing view, target's incoming view) or from none of them.
//!
//! ## Example Usage
//!
//! ```rust
//! use rivers::graph::{Graph, GraphError};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node("A").unwrap();
//! let b = graph.add_node("B").unwrap();
//! let c = graph.add_node("C").unwrap();
//!
//! let e1 = graph.add_edge(a, b).unwrap();
//! // Edges can also be added through either endpoint's view, by name
//! let e2 = graph.outgoing_mut(a).unwrap().add("C").unwrap();
//! let e3 = graph.incoming_mut(c).unwrap().add(b).unwrap();
//!
//! let out: Vec<_> = graph.outgoing(a).unwrap().iter().map(|e| e.id()).collect();
//! assert_eq!(out, vec![e1, e2]);
//! assert_eq!(graph.outgoing("B").unwrap().get("C").unwrap().id(), e3);
//!
//! // Removing a node detaches every incident edge
//! graph.remove_node("B").unwrap();
//! assert_eq!(graph.edge_count(), 1);
//! assert!(matches!(graph.node("B"), Err(GraphError::NodeNotFound(_))));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;

// Re-export main types for convenience
pub use graph::{
    Adjacency, AdjacencyMut, AdjacencyView, Direction, Edge, EdgeId, Graph, GraphConfig,
    GraphError, GraphId, GraphResult, GraphSnapshot, Node, NodeId, NodeKey, UserData, Value,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
