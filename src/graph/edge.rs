//! Edge implementation
//!
//! An edge's identity (id, source, target) is fixed at construction. Its user
//! data (label, weight, key/value map) stays mutable for as long as the edge
//! lives.

use super::arena::Keyed;
use super::data::{UserData, Value};
use super::types::{Direction, EdgeId, NodeId};
use serde::Serialize;

/// A directed edge
///
/// Edges are created by the graph, either registered straight away
/// (`Graph::add_edge`) or handed out detached (`Graph::build_edge`,
/// `Graph::remove_edge`) for the caller to register later. Two edges with
/// the same endpoints are distinct: equality and hashing use the id only.
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,

    /// Optional relationship label
    pub label: Option<String>,

    /// Optional weight, for algorithms that want one
    pub weight: Option<f64>,

    /// Arbitrary user data
    pub data: UserData,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Edge {
            id,
            source,
            target,
            label: None,
            weight: None,
            data: UserData::new(),
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Node the edge goes FROM
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Node the edge goes TO
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The endpoint an adjacency view of the given direction is owned by
    pub fn endpoint(&self, direction: Direction) -> NodeId {
        match direction {
            Direction::Outgoing => self.source,
            Direction::Incoming => self.target,
        }
    }

    /// The endpoint an adjacency view of the given direction keys this edge by
    pub fn neighbour(&self, direction: Direction) -> NodeId {
        self.endpoint(direction.reverse())
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, node1: NodeId, node2: NodeId) -> bool {
        (self.source == node1 && self.target == node2)
            || (self.source == node2 && self.target == node1)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.set(key, value);
        self
    }
}

impl Keyed for Edge {
    type Key = EdgeId;

    fn key(&self) -> EdgeId {
        self.id
    }
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
