//! # Mindmap Graph
//!
//! In-memory graph model of a mind map: nodes placed on an infinite canvas and
//! directed edges between them.
//!
//! ## Features
//!
//! * Stable node identity with automatic index assignment
//! * Referential integrity: edges can only join live nodes, and removing a
//!   node removes every edge touching it
//! * Deterministic iteration (nodes by ascending index, edges by id)
//! * Generic over the node type through the [`NodeModel`] trait
//! * Optional [`Grid`] snapping for node locations
//!
//! ## Example
//!
//! ```
//! use mindmap_graph::{EdgeData, Graph, GraphError, Node, NodeIndex};
//!
//! let mut graph: Graph = Graph::new();
//! let root = graph.add_node(Node::new((0.0, 0.0), "Root")).unwrap();
//! let child = graph.add_node(Node::new((120.0, 40.0), "Child")).unwrap();
//! graph.add_edge(root, child, EdgeData::labeled("has")).unwrap();
//!
//! assert_eq!(
//!     graph.add_edge(root, NodeIndex(99), EdgeData::default()),
//!     Err(GraphError::NodeNotFound(NodeIndex(99)))
//! );
//!
//! graph.remove_node(child).unwrap();
//! assert_eq!(graph.edge_count(), 0);
//! ```
//!
//! The graph does no internal locking. Callers that share one across threads
//! must serialize access themselves.

mod edge;
mod error;
mod graph;
mod grid;
mod node;
mod types;

pub use edge::{ArrowMode, Edge, EdgeData};
pub use error::{GraphError, ParseArrowModeError};
pub use graph::Graph;
pub use grid::Grid;
pub use node::{Node, NodeModel};
pub use types::{EdgeId, NodeIndex, Point};
