//! Core type definitions for the graph
//!
//! Node and edge ids carry the id of the graph that allocated them, so a key
//! handed to the wrong graph is rejected instead of silently aliasing a slot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a graph instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    /// Allocate a fresh id. Never returns the same value twice in a process.
    pub(crate) fn next() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphId({})", self.0)
    }
}

/// Unique identifier for a node
///
/// Indices are handed out in creation order and never reused within a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId {
    graph: GraphId,
    index: u64,
}

impl NodeId {
    pub(crate) fn new(graph: GraphId, index: u64) -> Self {
        NodeId { graph, index }
    }

    /// The graph that allocated this id
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn as_u64(&self) -> u64 {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.index)
    }
}

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId {
    graph: GraphId,
    index: u64,
}

impl EdgeId {
    pub(crate) fn new(graph: GraphId, index: u64) -> Self {
        EdgeId { graph, index }
    }

    /// The graph that allocated this id
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn as_u64(&self) -> u64 {
        self.index
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.index)
    }
}

/// Which endpoint of an edge an adjacency view is keyed by
///
/// An outgoing view on N holds edges whose source is N and keys them by
/// target; an incoming view holds edges whose target is N and keys them by
/// source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outgoing,
    Incoming,
}

impl Direction {
    /// The direction of the reciprocal view on the other endpoint
    pub fn reverse(self) -> Self {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Outgoing => write!(f, "outgoing"),
            Direction::Incoming => write!(f, "incoming"),
        }
    }
}
