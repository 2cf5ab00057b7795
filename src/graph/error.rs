//! Errors reported by graph and adjacency operations
//!
//! Every failure is local and synchronous. "Not found" conditions have a
//! `try_*` twin that returns `Option` instead.

use super::types::{Direction, EdgeId, NodeId};
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' already exists")]
    DuplicateNode(String),

    #[error("Node {0} not found")]
    NodeNotFound(String),

    #[error("Edge {0} not found")]
    EdgeNotFound(String),

    #[error("Node {0} does not belong to this graph")]
    UnknownNode(NodeId),

    #[error("Edge {0} does not belong to this graph")]
    CrossGraphEdge(EdgeId),

    #[error("Edge {edge} ({source_node} -> {target_node}) cannot be registered in the {direction} view of {owner}")]
    EndpointMismatch {
        edge: EdgeId,
        source_node: NodeId,
        target_node: NodeId,
        owner: NodeId,
        direction: Direction,
    },

    #[error("Edge {0} is already registered")]
    DuplicateEdge(EdgeId),

    #[error("Invalid graph configuration: {0}")]
    InvalidConfig(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
