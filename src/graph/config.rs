//! Graph configuration

use super::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};

/// Tunables for a [`Graph`](super::Graph)
///
/// Deserializable so embedding applications can keep it alongside their own
/// settings; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// When false, edge lookups between two nodes match either orientation
    /// and successors/predecessors both report the full neighbourhood
    pub directed: bool,

    /// Pre-allocated node slots
    pub node_capacity: usize,

    /// Pre-allocated edge slots
    pub edge_capacity: usize,

    /// Minimum number of removed-entity tombstones before storage compacts
    pub compaction_threshold: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: true,
            node_capacity: 64,
            edge_capacity: 256,
            compaction_threshold: 64,
        }
    }
}

impl GraphConfig {
    /// Default configuration with edges treated as undirected
    pub fn undirected() -> Self {
        Self {
            directed: false,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> GraphResult<()> {
        if self.compaction_threshold == 0 {
            return Err(GraphError::InvalidConfig(
                "compaction_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
