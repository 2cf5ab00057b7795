//! Lookup keys for nodes
//!
//! Most operations accept a node either by id or by name. [`NodeKey`] lets a
//! single method take both.

use super::error::{GraphError, GraphResult};
use super::node::Node;
use super::store::Graph;
use super::types::NodeId;

/// Something that identifies a node within a graph
pub trait NodeKey {
    /// Resolve to a live node id, or `None`. Never fails.
    fn try_resolve(&self, graph: &Graph) -> Option<NodeId>;

    /// Resolve to a live node id
    ///
    /// Fails with `UnknownNode` for an id allocated by another graph and
    /// with `NodeNotFound` for a missing name or a removed node.
    fn resolve(&self, graph: &Graph) -> GraphResult<NodeId>;
}

impl NodeKey for NodeId {
    fn try_resolve(&self, graph: &Graph) -> Option<NodeId> {
        graph.has_node_id(*self).then_some(*self)
    }

    fn resolve(&self, graph: &Graph) -> GraphResult<NodeId> {
        if self.graph() != graph.id() {
            return Err(GraphError::UnknownNode(*self));
        }
        self.try_resolve(graph)
            .ok_or_else(|| GraphError::NodeNotFound(self.to_string()))
    }
}

impl NodeKey for str {
    fn try_resolve(&self, graph: &Graph) -> Option<NodeId> {
        graph.node_id_by_name(self)
    }

    fn resolve(&self, graph: &Graph) -> GraphResult<NodeId> {
        self.try_resolve(graph)
            .ok_or_else(|| GraphError::NodeNotFound(format!("'{}'", self)))
    }
}

impl NodeKey for String {
    fn try_resolve(&self, graph: &Graph) -> Option<NodeId> {
        self.as_str().try_resolve(graph)
    }

    fn resolve(&self, graph: &Graph) -> GraphResult<NodeId> {
        self.as_str().resolve(graph)
    }
}

impl NodeKey for Node {
    fn try_resolve(&self, graph: &Graph) -> Option<NodeId> {
        self.id().try_resolve(graph)
    }

    fn resolve(&self, graph: &Graph) -> GraphResult<NodeId> {
        self.id().resolve(graph)
    }
}

impl<K: NodeKey + ?Sized> NodeKey for &K {
    fn try_resolve(&self, graph: &Graph) -> Option<NodeId> {
        (**self).try_resolve(graph)
    }

    fn resolve(&self, graph: &Graph) -> GraphResult<NodeId> {
        (**self).resolve(graph)
    }
}
