//! # Mindmap Serializer
//!
//! Reads and writes mind-map documents in the XML design format.
//!
//! A document is a `design` root element carrying a `version` attribute,
//! followed by one `node` element per node and one `edge` element per edge:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <design version="0.1.0">
//!     <node index="0" x="0" y="0">
//!         <text>Root</text>
//!     </node>
//!     <node index="1" x="120500" y="-40000">
//!         <text>Child</text>
//!     </node>
//!     <edge source="0" target="1" arrowMode="single" reversed="false" dashed="false">
//!         <text>has</text>
//!     </edge>
//! </design>
//! ```
//!
//! Coordinates are stored as integers scaled by [`SCALE`] (1000), so only
//! three decimal places survive a round trip. Unknown elements are ignored
//! when loading, and a missing `version` loads as [`UNDEFINED_VERSION`].
//!
//! Control characters that XML 1.0 cannot represent are dropped from labels
//! on save, and files containing them are rejected as corrupted. Carriage
//! returns and tabs are kept by writing them as character references.
//!
//! ## Example
//!
//! ```
//! use mindmap_graph::{EdgeData, Node, NodeModel};
//! use mindmap_serializer::{load, save, Document};
//!
//! let mut document: Document = Document::new("0.1.0");
//! let graph = document.graph_mut();
//! let root = graph.add_node(Node::new((0.0, 0.0), "Root")).unwrap();
//! let child = graph.add_node(Node::new((120.5, -40.0), "Child")).unwrap();
//! graph.add_edge(root, child, EdgeData::labeled("has")).unwrap();
//!
//! let xml = save(&document).to_xml_string().unwrap();
//! let loaded: Document = load(xml.as_bytes()).unwrap();
//!
//! assert_eq!(loaded.graph().node_count(), 2);
//! assert_eq!(loaded.graph().get_node(child).unwrap().text(), "Child");
//! ```

mod config;
mod coords;
mod document;
mod error;
mod serializer;

pub mod keywords;
pub mod tree;

pub use config::SerializerConfig;
pub use coords::{decode as decode_coordinate, encode as encode_coordinate, SCALE};
pub use document::Document;
pub use error::{SerializerError, SerializerResult};
pub use keywords::UNDEFINED_VERSION;
pub use serializer::Serializer;
pub use tree::{XmlElement, XmlNode, XmlTree};

use mindmap_graph::NodeModel;
use std::io::Read;

/// Load a document from `reader` with the default configuration
///
/// # Errors
///
/// * [`SerializerError::CannotOpenFile`] if the reader fails
/// * [`SerializerError::CorruptedFile`] if the bytes are not well-formed XML
/// * [`SerializerError::Graph`], [`SerializerError::InvalidEdge`] or
///   [`SerializerError::MissingEdgeEndpoint`] if the content breaks graph
///   integrity
pub fn load<N: NodeModel, R: Read>(reader: R) -> SerializerResult<Document<N>> {
    Serializer::default().load(reader)
}

/// Convert a document to its XML tree with the default configuration
pub fn save<N: NodeModel>(document: &Document<N>) -> XmlTree {
    Serializer::default().save(document)
}

/// Returns the version of this crate, which is the default version stamped
/// on saved documents
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
