//! Core graph implementation
//!
//! This module implements a mutable directed multigraph with:
//! - Uniquely named nodes carrying open key/value user data
//! - Directed edges with optional label, weight and user data
//! - Parallel edges and self-loops
//! - Per-node outgoing/incoming adjacency views kept in step with the
//!   canonical edge set on every mutation
//! - Arena storage with insertion-ordered enumeration

mod arena;

pub mod adjacency;
pub mod config;
pub mod data;
pub mod edge;
pub mod error;
pub mod key;
pub mod node;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-export main types
pub use adjacency::{Adjacency, AdjacencyIter, AdjacencyMut, AdjacencyView};
pub use config::GraphConfig;
pub use data::{UserData, Value};
pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use key::NodeKey;
pub use node::Node;
pub use snapshot::{EdgeRecord, GraphSnapshot, NodeRecord};
pub use store::Graph;
pub use types::{Direction, EdgeId, GraphId, NodeId};
