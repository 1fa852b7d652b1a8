//! sn-graph: network model layer for sewernet.
//!
//! Provides:
//! - Manhole and pipe records (Node, Link) with their classification enums
//! - The arena-backed `Network` with lazily derived up/down adjacency
//! - Incremental network builder with input validation
//! - Topology checks for the node-link-node invariant
//!
//! # Example
//!
//! ```
//! use sn_graph::{Link, NetworkBuilder, Node, NodeKind};
//!
//! let mut builder = NetworkBuilder::new();
//! builder.add_node(Node::new("A", NodeKind::Junction).with_invert(101.0));
//! builder.add_node(Node::new("B", NodeKind::Junction));
//! builder.add_link(Link::new("P1", "A", "B", 40.0));
//! let network = builder.build().unwrap();
//!
//! let b = network.node_idx("B").unwrap();
//! assert_eq!(network.links_up(b).len(), 1);
//! assert!(network.links_down(b).is_empty());
//! ```

pub mod adjacency;
pub mod builder;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod validate;

// Re-exports for ergonomics
pub use adjacency::Adjacency;
pub use builder::NetworkBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Link, Network, NetworkClass, Node, NodeKind, OutfallType};
pub use indexing::IdIndex;
pub use validate::{TopologyViolation, check_topology};
