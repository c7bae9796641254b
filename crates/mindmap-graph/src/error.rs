use thiserror::Error;

use crate::types::{EdgeId, NodeIndex};

/// Integrity errors reported by [`Graph`](crate::Graph) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No live node has the given index
    #[error("Node not found: {0}")]
    NodeNotFound(NodeIndex),

    /// A live node already owns the given index
    #[error("Duplicate node index: {0}")]
    DuplicateIndex(NodeIndex),

    /// No edge has the given id
    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// The directed pair is already connected
    #[error("Edge already exists: {from} -> {to}")]
    DuplicateEdge {
        /// Source node of the rejected edge
        from: NodeIndex,
        /// Target node of the rejected edge
        to: NodeIndex,
    },
}

impl GraphError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            GraphError::NodeNotFound(_) => "ERR_GRAPH_NODE_NOT_FOUND",
            GraphError::DuplicateIndex(_) => "ERR_GRAPH_DUPLICATE_INDEX",
            GraphError::EdgeNotFound(_) => "ERR_GRAPH_EDGE_NOT_FOUND",
            GraphError::DuplicateEdge { .. } => "ERR_GRAPH_DUPLICATE_EDGE",
        }
    }
}

/// Returned when a string does not name an [`ArrowMode`](crate::ArrowMode)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown arrow mode: '{0}'")]
pub struct ParseArrowModeError(pub String);
