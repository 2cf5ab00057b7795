//! In-memory graph storage
//!
//! The graph owns flat arenas of nodes and edges. Adjacency views inside the
//! nodes hold edge ids only, so there are no reference cycles and the edge
//! arena is the single owner of every edge.
//!
//! Every structural mutation funnels into two private primitives, `attach`
//! and `detach`, which update the canonical edge set and both endpoint views
//! together. No public call can leave an edge visible in one of the three
//! places and missing from another.
//!
//! # Concurrency
//!
//! `Graph` is `Send + Sync` and has no interior mutability. Shared readers
//! are fine; writers need `&mut Graph`, so callers sharing a graph across
//! threads must serialise mutation themselves (e.g. `RwLock<Graph>`).

use super::adjacency::{Adjacency, AdjacencyMut, AdjacencyView};
use super::arena::Arena;
use super::config::GraphConfig;
use super::data::UserData;
use super::edge::Edge;
use super::error::{GraphError, GraphResult};
use super::key::NodeKey;
use super::node::Node;
use super::types::{Direction, EdgeId, GraphId, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

/// A mutable directed multigraph of uniquely named nodes
///
/// Parallel edges and self-loops are allowed. Nodes and edges enumerate in
/// insertion order.
#[derive(Debug)]
pub struct Graph {
    id: GraphId,
    config: GraphConfig,

    /// Node storage (insertion-ordered arena)
    nodes: Arena<Node>,

    /// Canonical edge set (insertion-ordered arena)
    edges: Arena<Edge>,

    /// Name index for fast lookups
    names: FxHashMap<String, NodeId>,

    /// Next node index; indices are never reused
    next_node_index: u64,

    /// Next edge index; indices are never reused
    next_edge_index: u64,
}

impl Graph {
    /// Create a new empty directed graph
    pub fn new() -> Self {
        Self::build(GraphConfig::default())
    }

    /// Create a new empty graph with the given configuration
    pub fn with_config(config: GraphConfig) -> GraphResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GraphConfig) -> Self {
        let id = GraphId::next();
        debug!("Creating graph {} (directed: {})", id, config.directed);
        let mut names = FxHashMap::default();
        names.reserve(config.node_capacity);
        Graph {
            id,
            nodes: Arena::with_capacity(config.node_capacity, config.compaction_threshold),
            edges: Arena::with_capacity(config.edge_capacity, config.compaction_threshold),
            names,
            next_node_index: 0,
            next_edge_index: 0,
            config,
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn is_directed(&self) -> bool {
        self.config.directed
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Create a node with no user data
    pub fn add_node(&mut self, name: impl Into<String>) -> GraphResult<NodeId> {
        self.add_node_with_data(name, UserData::new())
    }

    /// Create a node carrying user data. Fails with `DuplicateNode` if the
    /// name is taken.
    pub fn add_node_with_data(
        &mut self,
        name: impl Into<String>,
        data: UserData,
    ) -> GraphResult<NodeId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(GraphError::DuplicateNode(name));
        }

        let id = NodeId::new(self.id, self.next_node_index);
        self.next_node_index += 1;

        self.names.insert(name.clone(), id);
        let inserted = self.nodes.insert(Node::new(id, name, data));
        debug_assert!(inserted, "node index {} allocated twice", id);

        trace!("Added node {}", id);
        Ok(id)
    }

    /// Remove a node and every edge incident to it
    ///
    /// Edges are detached from the canonical set and from each neighbour's
    /// reciprocal view before the node goes. A self-loop sits in both of the
    /// node's views but is detached once. Returns the node with empty views.
    /// Runs in time linear in the node's degree.
    pub fn remove_node(&mut self, node: impl NodeKey) -> GraphResult<Node> {
        let id = node.resolve(self)?;

        let removed =
            self.detach_all(id, Direction::Outgoing) + self.detach_all(id, Direction::Incoming);

        let node = self
            .nodes
            .remove(&id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        self.names.remove(node.name());
        debug_assert!(node.is_isolated(), "node {} still has edges after cascade", id);

        debug!("Removed node {} and {} incident edges", id, removed);
        Ok(node)
    }

    /// Get a node, failing with `NodeNotFound`/`UnknownNode`
    pub fn node(&self, node: impl NodeKey) -> GraphResult<&Node> {
        let id = node.resolve(self)?;
        self.nodes
            .get(&id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    pub fn try_node(&self, node: impl NodeKey) -> Option<&Node> {
        let id = node.try_resolve(self)?;
        self.nodes.get(&id)
    }

    /// Mutable access to a node's user data
    pub fn node_mut(&mut self, node: impl NodeKey) -> GraphResult<&mut Node> {
        let id = node.resolve(self)?;
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    pub fn contains_node(&self, node: impl NodeKey) -> bool {
        node.try_resolve(self).is_some()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn has_node_id(&self, id: NodeId) -> bool {
        id.graph() == self.id && self.nodes.contains_key(&id)
    }

    pub(crate) fn node_id_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    // ------------------------------------------------------------------
    // Edges
    // ------------------------------------------------------------------

    /// Create and register an edge `source -> target`
    ///
    /// Delegates to the source's outgoing view.
    pub fn add_edge(&mut self, source: impl NodeKey, target: impl NodeKey) -> GraphResult<EdgeId> {
        self.outgoing_mut(source)?.add(target)
    }

    /// Build a detached edge `source -> target` without registering it
    ///
    /// The edge gets its id now; user data can be filled in before handing
    /// it to [`insert_edge`](Self::insert_edge) or a view's `add_edge`.
    pub fn build_edge(&mut self, source: impl NodeKey, target: impl NodeKey) -> GraphResult<Edge> {
        let source = source.resolve(self)?;
        let target = target.resolve(self)?;
        Ok(self.allocate_edge(source, target))
    }

    /// Register a pre-built edge through its source's outgoing view
    pub fn insert_edge(&mut self, edge: Edge) -> GraphResult<EdgeId> {
        if edge.id().graph() != self.id {
            return Err(GraphError::CrossGraphEdge(edge.id()));
        }
        let source = edge.source();
        self.outgoing_mut(source)?.add_edge(edge)
    }

    /// Remove an edge from all three locations and return it detached
    pub fn remove_edge(&mut self, edge: EdgeId) -> GraphResult<Edge> {
        if edge.graph() != self.id {
            return Err(GraphError::CrossGraphEdge(edge));
        }
        self.detach(edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.to_string()))
    }

    /// Get an edge, failing with `EdgeNotFound`
    pub fn edge(&self, edge: EdgeId) -> GraphResult<&Edge> {
        if edge.graph() != self.id {
            return Err(GraphError::CrossGraphEdge(edge));
        }
        self.edges
            .get(&edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.to_string()))
    }

    pub fn try_edge(&self, edge: EdgeId) -> Option<&Edge> {
        self.edges.get(&edge)
    }

    /// Mutable access to an edge's user data
    pub fn edge_mut(&mut self, edge: EdgeId) -> GraphResult<&mut Edge> {
        if edge.graph() != self.id {
            return Err(GraphError::CrossGraphEdge(edge));
        }
        self.edges
            .get_mut(&edge)
            .ok_or_else(|| GraphError::EdgeNotFound(edge.to_string()))
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains_key(&edge)
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// First edge from `a` to `b`
    ///
    /// In an undirected graph an edge `b -> a` also matches; edges leaving
    /// `a` are preferred, then first-match by registration order.
    pub fn find_edge(&self, a: impl NodeKey, b: impl NodeKey) -> GraphResult<&Edge> {
        let a = a.resolve(self)?;
        let b = b.resolve(self)?;
        self.find_edge_between(a, b)
            .ok_or_else(|| GraphError::EdgeNotFound(format!("{} -> {}", a, b)))
    }

    pub fn try_find_edge(&self, a: impl NodeKey, b: impl NodeKey) -> Option<&Edge> {
        let a = a.try_resolve(self)?;
        let b = b.try_resolve(self)?;
        self.find_edge_between(a, b)
    }

    fn find_edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        let node = self.nodes.get(&a)?;
        let found = node.outgoing().first_to(b).or_else(|| {
            if self.config.directed {
                None
            } else {
                node.incoming().first_to(b)
            }
        });
        found.and_then(|edge| self.edges.get(&edge))
    }

    // ------------------------------------------------------------------
    // Adjacency
    // ------------------------------------------------------------------

    /// Read handle over a node's outgoing edges
    pub fn outgoing(&self, node: impl NodeKey) -> GraphResult<Adjacency<'_>> {
        self.adjacency(node, Direction::Outgoing)
    }

    /// Read handle over a node's incoming edges
    pub fn incoming(&self, node: impl NodeKey) -> GraphResult<Adjacency<'_>> {
        self.adjacency(node, Direction::Incoming)
    }

    pub fn adjacency(&self, node: impl NodeKey, direction: Direction) -> GraphResult<Adjacency<'_>> {
        let node = self.node(node)?;
        Ok(Adjacency::new(self, node.view(direction)))
    }

    /// Mutating handle over a node's outgoing edges
    pub fn outgoing_mut(&mut self, node: impl NodeKey) -> GraphResult<AdjacencyMut<'_>> {
        self.adjacency_mut(node, Direction::Outgoing)
    }

    /// Mutating handle over a node's incoming edges
    pub fn incoming_mut(&mut self, node: impl NodeKey) -> GraphResult<AdjacencyMut<'_>> {
        self.adjacency_mut(node, Direction::Incoming)
    }

    pub fn adjacency_mut(
        &mut self,
        node: impl NodeKey,
        direction: Direction,
    ) -> GraphResult<AdjacencyMut<'_>> {
        let owner = node.resolve(self)?;
        Ok(AdjacencyMut::new(self, owner, direction))
    }

    pub(crate) fn view_of(&self, owner: NodeId, direction: Direction) -> Option<&AdjacencyView> {
        self.nodes.get(&owner).map(|node| node.view(direction))
    }

    /// Distinct targets of `node`'s outgoing edges
    ///
    /// In an undirected graph this is the full neighbourhood.
    pub fn successors(&self, node: impl NodeKey) -> GraphResult<Vec<NodeId>> {
        if !self.config.directed {
            return self.neighbours(node);
        }
        Ok(self.node(node)?.outgoing().neighbours())
    }

    /// Distinct sources of `node`'s incoming edges
    ///
    /// In an undirected graph this is the full neighbourhood.
    pub fn predecessors(&self, node: impl NodeKey) -> GraphResult<Vec<NodeId>> {
        if !self.config.directed {
            return self.neighbours(node);
        }
        Ok(self.node(node)?.incoming().neighbours())
    }

    /// Distinct nodes adjacent in either direction, successors first
    pub fn neighbours(&self, node: impl NodeKey) -> GraphResult<Vec<NodeId>> {
        let node = self.node(node)?;
        let mut seen = FxHashSet::default();
        Ok(node
            .outgoing()
            .neighbours()
            .into_iter()
            .chain(node.incoming().neighbours())
            .filter(|n| seen.insert(*n))
            .collect())
    }

    pub fn out_degree(&self, node: impl NodeKey) -> GraphResult<usize> {
        Ok(self.node(node)?.out_degree())
    }

    pub fn in_degree(&self, node: impl NodeKey) -> GraphResult<usize> {
        Ok(self.node(node)?.in_degree())
    }

    /// Incident edge count; a self-loop counts twice
    pub fn degree(&self, node: impl NodeKey) -> GraphResult<usize> {
        Ok(self.node(node)?.degree())
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        debug!(
            "Clearing graph {} ({} nodes, {} edges)",
            self.id,
            self.nodes.len(),
            self.edges.len()
        );
        self.nodes.clear();
        self.edges.clear();
        self.names.clear();
    }

    /// Check the three-way edge invariant and the name index. O(V + E).
    ///
    /// Every canonical edge must sit in exactly its source's outgoing view
    /// and its target's incoming view, and every view entry must point at a
    /// canonical edge with the right endpoints. Each view's neighbour index
    /// must list the same edges, grouped by neighbour, in registration order.
    pub fn is_consistent(&self) -> bool {
        let edges_ok = self.edges.iter().all(|edge| {
            let out_ok = self
                .view_of(edge.source(), Direction::Outgoing)
                .and_then(|view| view.neighbour_of(edge.id()))
                == Some(edge.target());
            let in_ok = self
                .view_of(edge.target(), Direction::Incoming)
                .and_then(|view| view.neighbour_of(edge.id()))
                == Some(edge.source());
            out_ok && in_ok
        });

        let mut out_total = 0;
        let mut in_total = 0;
        let views_ok = self.nodes.iter().all(|node| {
            out_total += node.out_degree();
            in_total += node.in_degree();
            self.names.get(node.name()) == Some(&node.id())
                && [Direction::Outgoing, Direction::Incoming]
                    .into_iter()
                    .all(|direction| {
                        let view = node.view(direction);
                        view.owner() == node.id()
                            && view.index_matches()
                            && view.entries().all(|(id, neighbour)| {
                                self.edges.get(&id).is_some_and(|edge| {
                                    edge.endpoint(direction) == node.id()
                                        && edge.neighbour(direction) == neighbour
                                })
                            })
                    })
        });

        edges_ok
            && views_ok
            && out_total == self.edges.len()
            && in_total == self.edges.len()
            && self.names.len() == self.nodes.len()
    }

    // ------------------------------------------------------------------
    // Mutation primitives
    // ------------------------------------------------------------------

    /// Hand out a fresh edge id. Endpoints must already be resolved.
    pub(crate) fn allocate_edge(&mut self, source: NodeId, target: NodeId) -> Edge {
        let id = EdgeId::new(self.id, self.next_edge_index);
        self.next_edge_index += 1;
        Edge::new(id, source, target)
    }

    /// Register a validated edge in the canonical set and mirror it into
    /// both endpoint views
    pub(crate) fn attach(&mut self, edge: Edge) -> EdgeId {
        let (id, source, target) = (edge.id(), edge.source(), edge.target());

        let inserted = self.edges.insert(edge);
        debug_assert!(inserted, "edge {} attached twice", id);

        let mirrored_out = self
            .nodes
            .get_mut(&source)
            .is_some_and(|node| node.view_mut(Direction::Outgoing).mirror_insert(id, target));
        let mirrored_in = self
            .nodes
            .get_mut(&target)
            .is_some_and(|node| node.view_mut(Direction::Incoming).mirror_insert(id, source));
        debug_assert!(
            mirrored_out && mirrored_in,
            "edge {} not mirrored into both endpoint views",
            id
        );

        trace!("Attached edge {} ({} -> {})", id, source, target);
        id
    }

    /// Remove an edge from the canonical set and both endpoint views.
    /// `None` if it was not registered.
    pub(crate) fn detach(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&id)?;
        let (source, target) = (edge.source(), edge.target());

        let out_removed = self
            .nodes
            .get_mut(&source)
            .and_then(|node| node.view_mut(Direction::Outgoing).mirror_remove(id));
        let in_removed = self
            .nodes
            .get_mut(&target)
            .and_then(|node| node.view_mut(Direction::Incoming).mirror_remove(id));
        debug_assert_eq!(out_removed, Some(target), "edge {} missing from outgoing view", id);
        debug_assert_eq!(in_removed, Some(source), "edge {} missing from incoming view", id);

        trace!("Detached edge {} ({} -> {})", id, source, target);
        Some(edge)
    }

    /// Detach every edge in one of `owner`'s views. Returns how many edges
    /// left the canonical set.
    ///
    /// The owner's view is emptied wholesale and each neighbour's reciprocal
    /// view is pruned once per neighbour, so this is linear in the view's
    /// size. A self-loop is pruned from the owner's other view on the same
    /// pass and counted once.
    pub(crate) fn detach_all(&mut self, owner: NodeId, direction: Direction) -> usize {
        let by_neighbour = match self.nodes.get_mut(&owner) {
            Some(node) => node.view_mut(direction).take_all(),
            None => return 0,
        };

        let mut detached = 0;
        for (neighbour, edges) in by_neighbour {
            // Both views registered these edges together, so orders agree
            let pruned = self
                .nodes
                .get_mut(&neighbour)
                .map(|node| node.view_mut(direction.reverse()).mirror_remove_neighbour(owner));
            debug_assert_eq!(
                pruned.as_deref(),
                Some(edges.as_slice()),
                "reciprocal view of {} out of step with {}",
                neighbour,
                owner
            );

            for edge in edges {
                if self.edges.remove(&edge).is_some() {
                    detached += 1;
                    trace!("Detached edge {} ({} {} {})", edge, owner, direction, neighbour);
                }
            }
        }
        detached
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
