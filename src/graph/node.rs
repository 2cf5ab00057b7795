//! Node implementation
//!
//! A node is a unique name, some user data, and the two adjacency views
//! indexing its incident edges.

use super::adjacency::AdjacencyView;
use super::arena::Keyed;
use super::data::UserData;
use super::types::{Direction, NodeId};

/// A named vertex
///
/// The name is unique within the owning graph and immutable. The adjacency
/// views are read-only from outside the crate; structural changes go through
/// the graph so both endpoints stay in step.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,

    /// Arbitrary user data
    pub data: UserData,

    outgoing: AdjacencyView,
    incoming: AdjacencyView,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String, data: UserData) -> Self {
        Node {
            id,
            name,
            data,
            outgoing: AdjacencyView::new(id, Direction::Outgoing),
            incoming: AdjacencyView::new(id, Direction::Incoming),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Edges this node is the source of, keyed by target
    pub fn outgoing(&self) -> &AdjacencyView {
        &self.outgoing
    }

    /// Edges this node is the target of, keyed by source
    pub fn incoming(&self) -> &AdjacencyView {
        &self.incoming
    }

    pub fn view(&self, direction: Direction) -> &AdjacencyView {
        match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        }
    }

    pub(crate) fn view_mut(&mut self, direction: Direction) -> &mut AdjacencyView {
        match direction {
            Direction::Outgoing => &mut self.outgoing,
            Direction::Incoming => &mut self.incoming,
        }
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.count()
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.count()
    }

    /// Total incident edge count; a self-loop counts twice
    pub fn degree(&self) -> usize {
        self.out_degree() + self.in_degree()
    }

    /// No incident edges in either direction
    pub fn is_isolated(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }
}

impl Keyed for Node {
    type Key = NodeId;

    fn key(&self) -> NodeId {
        self.id
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{EdgeId, GraphId};

    #[test]
    fn test_new_node_has_empty_views() {
        let id = NodeId::new(GraphId::next(), 0);
        let node = Node::new(id, "A".to_string(), UserData::new());

        assert_eq!(node.name(), "A");
        assert_eq!(node.outgoing().owner(), id);
        assert_eq!(node.outgoing().direction(), Direction::Outgoing);
        assert_eq!(node.incoming().direction(), Direction::Incoming);
        assert!(node.is_isolated());
        assert_eq!(node.degree(), 0);
    }

    #[test]
    fn test_degrees() {
        let graph = GraphId::next();
        let id = NodeId::new(graph, 0);
        let other = NodeId::new(graph, 1);
        let mut node = Node::new(id, "A".to_string(), UserData::new());

        node.view_mut(Direction::Outgoing).mirror_insert(EdgeId::new(graph, 0), other);
        node.view_mut(Direction::Outgoing).mirror_insert(EdgeId::new(graph, 1), id);
        node.view_mut(Direction::Incoming).mirror_insert(EdgeId::new(graph, 1), id);

        assert_eq!(node.out_degree(), 2);
        assert_eq!(node.in_degree(), 1);
        assert_eq!(node.degree(), 3);
        assert!(!node.is_isolated());
        assert_eq!(node.view(Direction::Incoming).count(), 1);
    }

    #[test]
    fn test_node_user_data() {
        let mut node = Node::new(NodeId::new(GraphId::next(), 0), "A".to_string(), UserData::new());
        node.data.set("visited", true);
        assert!(node.data.contains("visited"));
    }

    #[test]
    fn test_node_equality_by_id() {
        let graph = GraphId::next();
        let a1 = Node::new(NodeId::new(graph, 0), "A".to_string(), UserData::new());
        let a2 = Node::new(NodeId::new(graph, 0), "A".to_string(), UserData::new());
        let b = Node::new(NodeId::new(graph, 1), "A".to_string(), UserData::new());
        assert_eq!(a1, a2);
        assert_ne!(a1, b);
    }
}
