//! Per-node adjacency indices
//!
//! Every node owns two [`AdjacencyView`]s, one per [`Direction`]. A view
//! indexes the edges incident to its owner in that direction, keyed by the
//! neighbour at the other end:
//!
//! - an outgoing view on N holds edges with source N, keyed by target
//! - an incoming view on N holds edges with target N, keyed by source
//!
//! Views store edge ids, never edges. The graph's canonical edge arena is the
//! only owner, so the three places an edge is reachable from (canonical set,
//! source's outgoing view, target's incoming view) are updated together by
//! the graph, and a view can never hold a dangling reference.
//!
//! Mutation goes through [`AdjacencyMut`], the validating driver. It checks
//! graph membership, endpoints and duplicates, then hands the edge to the
//! graph, which mirrors it into both views through the non-validating
//! `mirror_insert`/`mirror_remove` fast path. The mirror path never calls back
//! into a driver, so there is no mutual recursion between the two views.
//!
//! Among parallel edges to the same neighbour, lookups use first-match: the
//! edge registered earliest in this view wins.

use super::arena::{self, Arena, Keyed};
use super::edge::Edge;
use super::error::{GraphError, GraphResult};
use super::key::NodeKey;
use super::store::Graph;
use super::types::{Direction, EdgeId, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};

/// Tombstones a view tolerates before compacting its edge list
const VIEW_COMPACTION_THRESHOLD: usize = 16;

/// One indexed edge and the neighbour it is keyed by
#[derive(Debug, Clone, Copy)]
struct Incidence {
    edge: EdgeId,
    neighbour: NodeId,
}

impl Keyed for Incidence {
    type Key = EdgeId;

    fn key(&self) -> EdgeId {
        self.edge
    }
}

/// Index of one node's incident edges in one direction
#[derive(Debug, Clone)]
pub struct AdjacencyView {
    owner: NodeId,
    direction: Direction,
    /// Edge -> neighbour, in registration order
    edges: Arena<Incidence>,
    /// Neighbour -> edges to it, in registration order. Never holds an
    /// empty list.
    by_neighbour: FxHashMap<NodeId, Vec<EdgeId>>,
}

impl AdjacencyView {
    pub(crate) fn new(owner: NodeId, direction: Direction) -> Self {
        AdjacencyView {
            owner,
            direction,
            edges: Arena::with_capacity(0, VIEW_COMPACTION_THRESHOLD),
            by_neighbour: FxHashMap::default(),
        }
    }

    /// The node this view belongs to
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of edges in the view. O(1).
    pub fn count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.len() == 0
    }

    /// Membership by edge identity, not by neighbour
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains_key(&edge)
    }

    pub fn contains_neighbour(&self, neighbour: NodeId) -> bool {
        self.by_neighbour.contains_key(&neighbour)
    }

    /// First-registered edge to/from `neighbour`
    pub fn first_to(&self, neighbour: NodeId) -> Option<EdgeId> {
        self.by_neighbour
            .get(&neighbour)
            .and_then(|edges| edges.first().copied())
    }

    /// All edges to/from `neighbour`, in registration order
    pub fn edges_to(&self, neighbour: NodeId) -> &[EdgeId] {
        self.by_neighbour
            .get(&neighbour)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The neighbour an indexed edge is keyed by
    pub fn neighbour_of(&self, edge: EdgeId) -> Option<NodeId> {
        self.edges.get(&edge).map(|incidence| incidence.neighbour)
    }

    /// Edge ids in registration order
    pub fn iter(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().map(|incidence| incidence.edge)
    }

    /// `(edge, neighbour)` pairs in registration order
    pub fn entries(&self) -> impl Iterator<Item = (EdgeId, NodeId)> + '_ {
        self.edges
            .iter()
            .map(|incidence| (incidence.edge, incidence.neighbour))
    }

    /// Distinct neighbours, in the order they were first seen
    pub fn neighbours(&self) -> Vec<NodeId> {
        let mut seen = FxHashSet::default();
        self.edges
            .iter()
            .map(|incidence| incidence.neighbour)
            .filter(|neighbour| seen.insert(*neighbour))
            .collect()
    }

    /// Non-validating insert used when mirroring a driver's change.
    /// Returns false if the edge was already indexed.
    pub(crate) fn mirror_insert(&mut self, edge: EdgeId, neighbour: NodeId) -> bool {
        if !self.edges.insert(Incidence { edge, neighbour }) {
            return false;
        }
        self.by_neighbour.entry(neighbour).or_default().push(edge);
        true
    }

    /// Non-validating removal used when mirroring a driver's change.
    /// Returns the neighbour the edge was keyed by, if it was indexed.
    pub(crate) fn mirror_remove(&mut self, edge: EdgeId) -> Option<NodeId> {
        let neighbour = self.edges.remove(&edge)?.neighbour;
        if let Some(list) = self.by_neighbour.get_mut(&neighbour) {
            if let Some(pos) = list.iter().position(|e| *e == edge) {
                list.remove(pos);
            }
            debug_assert!(!list.contains(&edge), "edge {} keyed twice", edge);
            if list.is_empty() {
                self.by_neighbour.remove(&neighbour);
            }
        }
        Some(neighbour)
    }

    /// Drop every edge keyed by `neighbour` in one pass. Returns them in
    /// registration order.
    pub(crate) fn mirror_remove_neighbour(&mut self, neighbour: NodeId) -> Vec<EdgeId> {
        let removed = self.by_neighbour.remove(&neighbour).unwrap_or_default();
        for edge in &removed {
            let incidence = self.edges.remove(edge);
            debug_assert!(
                incidence.is_some_and(|i| i.neighbour == neighbour),
                "edge {} keyed by {} but not indexed against it",
                edge,
                neighbour
            );
        }
        removed
    }

    /// Empty the view, handing back its edges grouped by neighbour
    pub(crate) fn take_all(&mut self) -> FxHashMap<NodeId, Vec<EdgeId>> {
        self.edges.clear();
        std::mem::take(&mut self.by_neighbour)
    }

    /// Whether the neighbour index agrees with the edge list: each
    /// neighbour's edges, in registration order, and nothing else.
    pub(crate) fn index_matches(&self) -> bool {
        let mut grouped: FxHashMap<NodeId, Vec<EdgeId>> = FxHashMap::default();
        for incidence in self.edges.iter() {
            grouped
                .entry(incidence.neighbour)
                .or_default()
                .push(incidence.edge);
        }
        grouped == self.by_neighbour
    }
}

/// Read handle over one adjacency view, able to resolve neighbours by name
///
/// Cheap to copy. Obtained from [`Graph::outgoing`], [`Graph::incoming`] or
/// [`Graph::adjacency`].
#[derive(Clone, Copy)]
pub struct Adjacency<'g> {
    graph: &'g Graph,
    view: &'g AdjacencyView,
}

impl<'g> Adjacency<'g> {
    pub(crate) fn new(graph: &'g Graph, view: &'g AdjacencyView) -> Self {
        Adjacency { graph, view }
    }

    /// The underlying index
    pub fn view(&self) -> &'g AdjacencyView {
        self.view
    }

    pub fn owner(&self) -> NodeId {
        self.view.owner
    }

    pub fn direction(&self) -> Direction {
        self.view.direction
    }

    pub fn count(&self) -> usize {
        self.view.count()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// First-registered edge to/from `neighbour`
    ///
    /// Fails with `EdgeNotFound` when no such edge exists, or with the
    /// key's resolution error when the neighbour itself is unknown.
    pub fn get(&self, neighbour: impl NodeKey) -> GraphResult<&'g Edge> {
        let neighbour = neighbour.resolve(self.graph)?;
        self.view
            .first_to(neighbour)
            .and_then(|edge| self.graph.try_edge(edge))
            .ok_or_else(|| {
                let (source, target) = match self.view.direction {
                    Direction::Outgoing => (self.view.owner, neighbour),
                    Direction::Incoming => (neighbour, self.view.owner),
                };
                GraphError::EdgeNotFound(format!("{} -> {}", source, target))
            })
    }

    pub fn try_get(&self, neighbour: impl NodeKey) -> Option<&'g Edge> {
        let neighbour = neighbour.try_resolve(self.graph)?;
        self.view
            .first_to(neighbour)
            .and_then(|edge| self.graph.try_edge(edge))
    }

    pub fn contains(&self, neighbour: impl NodeKey) -> bool {
        self.try_get(neighbour).is_some()
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.view.contains_edge(edge)
    }

    /// All edges to/from `neighbour`, in registration order. Empty when the
    /// neighbour does not resolve.
    pub fn get_all(&self, neighbour: impl NodeKey) -> Vec<&'g Edge> {
        let Some(neighbour) = neighbour.try_resolve(self.graph) else {
            return Vec::new();
        };
        self.view
            .edges_to(neighbour)
            .iter()
            .filter_map(|edge| self.graph.try_edge(*edge))
            .collect()
    }

    /// Distinct neighbours, in the order they were first seen
    pub fn neighbours(&self) -> Vec<NodeId> {
        self.view.neighbours()
    }

    /// Lazily enumerate the view's edges in registration order
    ///
    /// Restartable: call `iter` again for a fresh pass. The iterator borrows
    /// the graph immutably, so mutating the graph while it is alive is a
    /// compile-time error rather than unspecified behaviour.
    pub fn iter(&self) -> AdjacencyIter<'g> {
        AdjacencyIter {
            graph: self.graph,
            incidences: self.view.edges.iter(),
        }
    }
}

impl<'g> IntoIterator for Adjacency<'g> {
    type Item = &'g Edge;
    type IntoIter = AdjacencyIter<'g>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for Adjacency<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adjacency")
            .field("owner", &self.view.owner)
            .field("direction", &self.view.direction)
            .field("count", &self.view.count())
            .finish()
    }
}

/// Iterator over the edges of one adjacency view
pub struct AdjacencyIter<'g> {
    graph: &'g Graph,
    incidences: arena::Iter<'g, Incidence>,
}

impl<'g> Iterator for AdjacencyIter<'g> {
    type Item = &'g Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.incidences.by_ref().find_map(|incidence| {
            let edge = graph.try_edge(incidence.edge);
            debug_assert!(
                edge.is_some(),
                "view references edge {} missing from graph",
                incidence.edge
            );
            edge
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.incidences.size_hint()
    }
}

/// Validating driver for mutations through one adjacency view
///
/// Obtained from [`Graph::outgoing_mut`], [`Graph::incoming_mut`] or
/// [`Graph::adjacency_mut`]. Every mutation updates the canonical edge set,
/// this view and the reciprocal view on the neighbour in one step.
pub struct AdjacencyMut<'g> {
    graph: &'g mut Graph,
    owner: NodeId,
    direction: Direction,
}

impl<'g> AdjacencyMut<'g> {
    pub(crate) fn new(graph: &'g mut Graph, owner: NodeId, direction: Direction) -> Self {
        AdjacencyMut {
            graph,
            owner,
            direction,
        }
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Reborrow as a read handle
    pub fn view(&self) -> GraphResult<Adjacency<'_>> {
        self.graph.adjacency(self.owner, self.direction)
    }

    pub fn count(&self) -> usize {
        self.graph
            .view_of(self.owner, self.direction)
            .map_or(0, AdjacencyView::count)
    }

    /// Connect the owner to `neighbour` with a new edge
    ///
    /// The edge runs owner -> neighbour for an outgoing view and
    /// neighbour -> owner for an incoming one. Fails with `UnknownNode` if
    /// `neighbour` is an id from another graph and `NodeNotFound` if it
    /// does not resolve.
    pub fn add(&mut self, neighbour: impl NodeKey) -> GraphResult<EdgeId> {
        let neighbour = neighbour.resolve(self.graph)?;
        let (source, target) = self.orient(neighbour);
        let edge = self.graph.allocate_edge(source, target);
        Ok(self.graph.attach(edge))
    }

    /// Register an edge the caller already built
    ///
    /// The edge's endpoint for this direction must be the owner
    /// (`EndpointMismatch` otherwise) and the edge must not already be
    /// registered (`DuplicateEdge`).
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<EdgeId> {
        if edge.id().graph() != self.graph.id() {
            return Err(GraphError::CrossGraphEdge(edge.id()));
        }
        if edge.endpoint(self.direction) != self.owner {
            return Err(GraphError::EndpointMismatch {
                edge: edge.id(),
                source_node: edge.source(),
                target_node: edge.target(),
                owner: self.owner,
                direction: self.direction,
            });
        }
        let neighbour = edge.neighbour(self.direction);
        if !self.graph.has_node_id(neighbour) {
            return Err(GraphError::NodeNotFound(neighbour.to_string()));
        }
        if self.graph.contains_edge(edge.id()) {
            return Err(GraphError::DuplicateEdge(edge.id()));
        }
        Ok(self.graph.attach(edge))
    }

    /// Remove the first-match edge to/from `neighbour`
    ///
    /// Returns false, touching nothing, when there is no such edge.
    pub fn remove(&mut self, neighbour: impl NodeKey) -> bool {
        let Some(neighbour) = neighbour.try_resolve(self.graph) else {
            return false;
        };
        let first = self
            .graph
            .view_of(self.owner, self.direction)
            .and_then(|view| view.first_to(neighbour));
        match first {
            Some(edge) => self.graph.detach(edge).is_some(),
            None => false,
        }
    }

    /// Remove one specific edge, which disambiguates parallel edges
    ///
    /// Returns false when the edge is not in this view, including edges of
    /// another graph.
    pub fn remove_edge(&mut self, edge: EdgeId) -> bool {
        let indexed = self
            .graph
            .view_of(self.owner, self.direction)
            .is_some_and(|view| view.contains_edge(edge));
        indexed && self.graph.detach(edge).is_some()
    }

    /// Detach every edge in this view from all three locations
    ///
    /// Edges of the owner in the other direction are untouched, except a
    /// self-loop, which lives in both of the owner's views. Returns the
    /// number of edges removed. Runs in time linear in the view's size.
    pub fn clear(&mut self) -> usize {
        self.graph.detach_all(self.owner, self.direction)
    }

    fn orient(&self, neighbour: NodeId) -> (NodeId, NodeId) {
        match self.direction {
            Direction::Outgoing => (self.owner, neighbour),
            Direction::Incoming => (neighbour, self.owner),
        }
    }
}

impl std::fmt::Debug for AdjacencyMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdjacencyMut")
            .field("owner", &self.owner)
            .field("direction", &self.direction)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::GraphId;

    fn view_with_nodes() -> (AdjacencyView, GraphId, NodeId, NodeId, NodeId) {
        let graph = GraphId::next();
        let a = NodeId::new(graph, 0);
        let b = NodeId::new(graph, 1);
        let c = NodeId::new(graph, 2);
        (AdjacencyView::new(a, Direction::Outgoing), graph, a, b, c)
    }

    #[test]
    fn test_mirror_insert_and_lookup() {
        let (mut view, graph, a, b, c) = view_with_nodes();
        let e1 = EdgeId::new(graph, 1);
        let e2 = EdgeId::new(graph, 2);

        assert!(view.mirror_insert(e1, b));
        assert!(view.mirror_insert(e2, c));
        assert!(!view.mirror_insert(e1, b));

        assert_eq!(view.owner(), a);
        assert_eq!(view.count(), 2);
        assert_eq!(view.first_to(b), Some(e1));
        assert_eq!(view.first_to(a), None);
        assert_eq!(view.neighbour_of(e2), Some(c));
        assert!(view.contains_neighbour(c));
    }

    #[test]
    fn test_first_match_among_parallel_edges() {
        let (mut view, graph, _, b, _) = view_with_nodes();
        let e1 = EdgeId::new(graph, 1);
        let e2 = EdgeId::new(graph, 2);
        let e3 = EdgeId::new(graph, 3);
        view.mirror_insert(e1, b);
        view.mirror_insert(e2, b);
        view.mirror_insert(e3, b);

        assert_eq!(view.first_to(b), Some(e1));
        assert_eq!(view.edges_to(b), &[e1, e2, e3]);

        view.mirror_remove(e1);
        assert_eq!(view.first_to(b), Some(e2));
    }

    #[test]
    fn test_mirror_remove_keeps_order() {
        let (mut view, graph, _, b, c) = view_with_nodes();
        let ids: Vec<EdgeId> = (0..4).map(|i| EdgeId::new(graph, i)).collect();
        view.mirror_insert(ids[0], b);
        view.mirror_insert(ids[1], c);
        view.mirror_insert(ids[2], b);
        view.mirror_insert(ids[3], c);

        assert_eq!(view.mirror_remove(ids[1]), Some(c));
        assert_eq!(view.mirror_remove(ids[1]), None);
        assert_eq!(view.iter().collect::<Vec<_>>(), vec![ids[0], ids[2], ids[3]]);
        assert_eq!(view.edges_to(c), &[ids[3]]);

        view.mirror_remove(ids[3]);
        assert!(!view.contains_neighbour(c));
        assert!(view.edges_to(c).is_empty());
    }

    #[test]
    fn test_neighbours_are_distinct_in_first_seen_order() {
        let (mut view, graph, _, b, c) = view_with_nodes();
        view.mirror_insert(EdgeId::new(graph, 1), c);
        view.mirror_insert(EdgeId::new(graph, 2), b);
        view.mirror_insert(EdgeId::new(graph, 3), c);
        assert_eq!(view.neighbours(), vec![c, b]);
    }

    #[test]
    fn test_handle_get_and_try_get() {
        let mut graph = Graph::new();
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();
        graph.add_node("C").unwrap();
        let e1 = graph.add_edge(a, b).unwrap();
        let e2 = graph.add_edge(a, b).unwrap();

        let out = graph.outgoing(a).unwrap();
        assert_eq!(out.get("B").unwrap().id(), e1);
        assert_eq!(out.get(b).unwrap().id(), e1);
        assert_eq!(out.try_get("B").map(Edge::id), Some(e1));
        assert_eq!(out.get_all("B").iter().map(|e| e.id()).collect::<Vec<_>>(), vec![e1, e2]);

        assert!(matches!(out.get("C"), Err(GraphError::EdgeNotFound(_))));
        assert!(matches!(out.get("Z"), Err(GraphError::NodeNotFound(_))));
        assert!(out.try_get("C").is_none());
        assert!(out.try_get("Z").is_none());
        assert!(out.contains("B"));
        assert!(!out.contains("C"));
        assert!(out.contains_edge(e2));
    }

    #[test]
    fn test_handle_iter_is_restartable() {
        let mut graph = Graph::new();
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();
        let e1 = graph.add_edge(a, b).unwrap();
        let e2 = graph.add_edge(a, a).unwrap();

        let out = graph.outgoing(a).unwrap();
        let first: Vec<EdgeId> = out.iter().map(Edge::id).collect();
        let second: Vec<EdgeId> = out.into_iter().map(Edge::id).collect();
        assert_eq!(first, vec![e1, e2]);
        assert_eq!(first, second);
        assert_eq!(out.iter().size_hint(), (2, Some(2)));
    }

    #[test]
    fn test_driver_add_through_incoming_view() {
        let mut graph = Graph::new();
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();

        let edge = graph.incoming_mut(b).unwrap().add("A").unwrap();
        let stored = graph.edge(edge).unwrap();
        assert_eq!(stored.source(), a);
        assert_eq!(stored.target(), b);
        assert!(graph.outgoing(a).unwrap().contains_edge(edge));
        assert!(graph.incoming(b).unwrap().contains_edge(edge));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_driver_add_unknown_neighbour() {
        let mut graph = Graph::new();
        let mut other = Graph::new();
        let a = graph.add_node("A").unwrap();
        let foreign = other.add_node("B").unwrap();

        let mut out = graph.outgoing_mut(a).unwrap();
        assert_eq!(out.add(foreign), Err(GraphError::UnknownNode(foreign)));
        assert!(matches!(out.add("B"), Err(GraphError::NodeNotFound(_))));
        assert_eq!(out.count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_driver_add_prebuilt_edge_checks() {
        let mut graph = Graph::new();
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();

        let edge = graph.build_edge(a, b).unwrap();
        let copy = edge.clone();

        // Wrong owner for an outgoing view
        let err = graph.outgoing_mut(b).unwrap().add_edge(edge.clone()).unwrap_err();
        assert!(matches!(err, GraphError::EndpointMismatch { owner, .. } if owner == b));

        // Wrong direction for the source
        let err = graph.incoming_mut(a).unwrap().add_edge(edge.clone()).unwrap_err();
        assert!(matches!(err, GraphError::EndpointMismatch { .. }));

        let id = graph.outgoing_mut(a).unwrap().add_edge(edge).unwrap();
        assert_eq!(
            graph.incoming_mut(b).unwrap().add_edge(copy),
            Err(GraphError::DuplicateEdge(id))
        );
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_driver_add_foreign_prebuilt_edge() {
        let mut graph = Graph::new();
        let mut other = Graph::new();
        let a = graph.add_node("A").unwrap();
        let x = other.add_node("X").unwrap();
        let foreign = other.build_edge(x, x).unwrap();
        let foreign_id = foreign.id();

        assert_eq!(
            graph.outgoing_mut(a).unwrap().add_edge(foreign),
            Err(GraphError::CrossGraphEdge(foreign_id))
        );
    }

    #[test]
    fn test_driver_remove_first_match() {
        let mut graph = Graph::new();
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();
        let e1 = graph.add_edge(a, b).unwrap();
        let e2 = graph.add_edge(a, b).unwrap();

        assert!(graph.outgoing_mut(a).unwrap().remove("B"));
        assert!(!graph.contains_edge(e1));
        assert!(graph.contains_edge(e2));
        assert!(graph.incoming(b).unwrap().contains_edge(e2));

        assert!(graph.incoming_mut(b).unwrap().remove(a));
        assert!(!graph.outgoing_mut(a).unwrap().remove("B"));
        assert!(!graph.outgoing_mut(a).unwrap().remove("missing"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_driver_remove_edge_only_from_own_view() {
        let mut graph = Graph::new();
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();
        let c = graph.add_node("C").unwrap();
        let ab = graph.add_edge(a, b).unwrap();
        let cb = graph.add_edge(c, b).unwrap();

        // cb is not in A's outgoing view
        assert!(!graph.outgoing_mut(a).unwrap().remove_edge(cb));
        assert!(graph.contains_edge(cb));

        assert!(graph.incoming_mut(b).unwrap().remove_edge(ab));
        assert!(!graph.incoming_mut(b).unwrap().remove_edge(ab));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_driver_clear_one_direction() {
        let mut graph = Graph::new();
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();
        let c = graph.add_node("C").unwrap();
        graph.add_edge(a, b).unwrap();
        graph.add_edge(a, c).unwrap();
        let ca = graph.add_edge(c, a).unwrap();

        assert_eq!(graph.outgoing_mut(a).unwrap().clear(), 2);
        assert_eq!(graph.outgoing(a).unwrap().count(), 0);
        assert_eq!(graph.incoming(b).unwrap().count(), 0);
        assert_eq!(graph.incoming(a).unwrap().iter().map(Edge::id).collect::<Vec<_>>(), vec![ca]);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.is_consistent());
    }

    #[test]
    fn test_remove_neighbour_in_one_pass() {
        let (mut view, graph, _, b, c) = view_with_nodes();
        let ids: Vec<EdgeId> = (0..5).map(|i| EdgeId::new(graph, i)).collect();
        for (i, id) in ids.iter().enumerate() {
            view.mirror_insert(*id, if i % 2 == 0 { b } else { c });
        }

        assert_eq!(view.mirror_remove_neighbour(b), vec![ids[0], ids[2], ids[4]]);
        assert!(view.mirror_remove_neighbour(b).is_empty());
        assert_eq!(view.iter().collect::<Vec<_>>(), vec![ids[1], ids[3]]);
        assert!(!view.contains_neighbour(b));
        assert!(view.index_matches());
    }

    #[test]
    fn test_index_drift_is_detected() {
        let mut graph = Graph::new();
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();
        graph.add_edge(a, b).unwrap();
        graph.add_edge(a, b).unwrap();
        assert!(graph.is_consistent());

        // Swap first-match order in the neighbour index only
        let view = graph.node_mut(a).unwrap().view_mut(Direction::Outgoing);
        view.by_neighbour.get_mut(&b).unwrap().reverse();
        assert!(!view.index_matches());
        assert!(!graph.is_consistent());
    }

    #[test]
    fn test_driver_view_reborrow() {
        let mut graph = Graph::new();
        let a = graph.add_node("A").unwrap();
        graph.add_node("B").unwrap();

        let mut out = graph.outgoing_mut(a).unwrap();
        let edge = out.add("B").unwrap();
        let view = out.view().unwrap();
        assert_eq!(view.owner(), a);
        assert_eq!(view.get("B").map(Edge::id), Ok(edge));
        assert_eq!(out.count(), 1);
    }
}
