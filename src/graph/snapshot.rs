//! Name-keyed snapshots of a graph
//!
//! A snapshot is plain serde data: nodes by name, edges by endpoint names.
//! Serializers for concrete file formats consume it; loading goes back
//! through the validating graph entry points, so a malformed snapshot
//! surfaces the usual `DuplicateNode`/`NodeNotFound` errors.

use super::config::GraphConfig;
use super::data::UserData;
use super::error::GraphResult;
use super::store::Graph;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "UserData::is_empty")]
    pub data: UserData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "UserData::is_empty")]
    pub data: UserData,
}

/// Order-preserving copy of a graph's structure and user data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub config: GraphConfig,
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl Graph {
    /// Capture nodes and edges in insertion order
    pub fn snapshot(&self) -> GraphResult<GraphSnapshot> {
        let nodes = self
            .nodes()
            .map(|node| NodeRecord {
                name: node.name().to_string(),
                data: node.data.clone(),
            })
            .collect();

        let edges = self
            .edges()
            .map(|edge| -> GraphResult<EdgeRecord> {
                Ok(EdgeRecord {
                    source: self.node(edge.source())?.name().to_string(),
                    target: self.node(edge.target())?.name().to_string(),
                    label: edge.label.clone(),
                    weight: edge.weight,
                    data: edge.data.clone(),
                })
            })
            .collect::<GraphResult<Vec<_>>>()?;

        Ok(GraphSnapshot {
            config: self.config().clone(),
            nodes,
            edges,
        })
    }

    /// Rebuild a graph from a snapshot
    pub fn from_snapshot(snapshot: GraphSnapshot) -> GraphResult<Graph> {
        let mut graph = Graph::with_config(snapshot.config)?;

        for record in snapshot.nodes {
            graph.add_node_with_data(record.name, record.data)?;
        }

        for record in snapshot.edges {
            let mut edge = graph.build_edge(record.source.as_str(), record.target.as_str())?;
            edge.label = record.label;
            edge.weight = record.weight;
            edge.data = record.data;
            graph.insert_edge(edge)?;
        }

        debug!(
            "Loaded snapshot into graph {} ({} nodes, {} edges)",
            graph.id(),
            graph.node_count(),
            graph.edge_count()
        );
        debug_assert!(graph.is_consistent());
        Ok(graph)
    }
}
