use mindmap_graph::GraphError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// All possible errors that can occur while loading or saving a document
#[derive(Error, Debug)]
pub enum SerializerError {
    /// The source could not be opened or read
    #[error("Cannot open file {}: {source}", .path.display())]
    CannotOpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination could not be created or written
    #[error("Cannot write file {}: {source}", .path.display())]
    CannotWriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input is not well-formed XML
    #[error("Corrupted file: {0}")]
    CorruptedFile(String),

    /// An edge element lacks a usable endpoint attribute
    #[error("Edge #{ordinal} has no valid '{attribute}' attribute")]
    MissingEdgeEndpoint {
        /// 1-based position among the document's edge elements
        ordinal: usize,
        attribute: &'static str,
    },

    /// An edge element could not be added to the graph
    #[error("Edge #{ordinal} is invalid: {cause}")]
    InvalidEdge {
        /// 1-based position among the document's edge elements
        ordinal: usize,
        #[source]
        cause: GraphError,
    },

    /// The document's nodes violate graph integrity
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Invalid serializer configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SerializerError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SerializerError::CannotOpenFile { .. } => "ERR_SERIALIZER_CANNOT_OPEN_FILE",
            SerializerError::CannotWriteFile { .. } => "ERR_SERIALIZER_CANNOT_WRITE_FILE",
            SerializerError::CorruptedFile(_) => "ERR_SERIALIZER_CORRUPTED_FILE",
            SerializerError::MissingEdgeEndpoint { .. } => "ERR_SERIALIZER_MISSING_EDGE_ENDPOINT",
            SerializerError::InvalidEdge { .. } => "ERR_SERIALIZER_INVALID_EDGE",
            SerializerError::Graph(err) => err.error_code(),
            SerializerError::InvalidConfig(_) => "ERR_SERIALIZER_INVALID_CONFIG",
        }
    }
}

/// Result alias used throughout the serializer
pub type SerializerResult<T> = Result<T, SerializerError>;
