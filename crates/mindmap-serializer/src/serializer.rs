use mindmap_graph::{ArrowMode, Edge, EdgeData, NodeIndex, NodeModel, Point};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::SerializerConfig;
use crate::coords;
use crate::document::Document;
use crate::error::{SerializerError, SerializerResult};
use crate::keywords::{edge, header, node, UNDEFINED_VERSION};
use crate::tree::{XmlElement, XmlTree};

/// Identifier reported when a reader without a path fails
const STREAM_SOURCE: &str = "<stream>";

/// Converts documents to and from the XML design format
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    config: SerializerConfig,
}

impl Serializer {
    /// Create a serializer after validating its configuration
    pub fn new(config: SerializerConfig) -> SerializerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Build the XML tree for a document.
    ///
    /// Nodes are written in ascending index order followed by edges in id
    /// order, so equal graphs always produce identical output. The root is
    /// stamped with the configured application version.
    pub fn to_xml<N: NodeModel>(&self, document: &Document<N>) -> XmlTree {
        let mut root = XmlElement::new(header::DESIGN);
        root.set_attribute(header::VERSION, &self.config.application_version);

        let graph = document.graph();
        for (index, node) in graph.nodes() {
            root.append_child(self.write_node(index, node));
        }
        for edge in graph.edges() {
            root.append_child(write_edge(edge));
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Serialized document"
        );
        XmlTree::new(root)
    }

    /// Same as [`Serializer::to_xml`]; the caller writes the bytes
    pub fn save<N: NodeModel>(&self, document: &Document<N>) -> XmlTree {
        self.to_xml(document)
    }

    /// Write a document to `path` and remember the path on the document.
    ///
    /// The document's version is updated to the stamped application version.
    pub fn save_to_path<N: NodeModel>(
        &self,
        document: &mut Document<N>,
        path: impl AsRef<Path>,
    ) -> SerializerResult<()> {
        let path = path.as_ref();
        let cannot_write = |source: io::Error| SerializerError::CannotWriteFile {
            path: path.to_path_buf(),
            source,
        };

        let tree = self.to_xml(document);
        let file = File::create(path).map_err(cannot_write)?;
        let mut writer = BufWriter::new(file);
        tree.write_to(&mut writer).map_err(cannot_write)?;
        writer.flush().map_err(cannot_write)?;

        document.set_version(self.config.application_version.clone());
        document.set_file_name(path);
        info!(path = %path.display(), "Saved document");
        Ok(())
    }

    /// Build a document from an XML tree.
    ///
    /// Unknown elements are skipped. Edges are resolved after every node has
    /// been added, so they may appear anywhere in the document.
    pub fn from_xml<N: NodeModel>(&self, tree: &XmlTree) -> SerializerResult<Document<N>> {
        let root = tree.root();
        let version = root.attribute(header::VERSION).unwrap_or(UNDEFINED_VERSION);
        let mut document: Document<N> = Document::new(version);

        let mut indexed = Vec::new();
        let mut unindexed = Vec::new();
        let mut edge_elements = Vec::new();

        for element in root.child_elements() {
            match element.name() {
                node::ELEMENT => {
                    let node: N = self.read_node(element);
                    if node.index().is_some() {
                        indexed.push(node);
                    } else {
                        unindexed.push(node);
                    }
                }
                edge::ELEMENT => edge_elements.push(element),
                other => debug!(element = other, "Skipping unrecognized element"),
            }
        }

        // Explicit indices go first so auto-numbering cannot claim them
        let graph = document.graph_mut();
        for node in indexed.into_iter().chain(unindexed) {
            graph.add_node(node)?;
        }

        for (position, element) in edge_elements.into_iter().enumerate() {
            let ordinal = position + 1;
            let source = read_endpoint(element, edge::SOURCE, ordinal)?;
            let target = read_endpoint(element, edge::TARGET, ordinal)?;
            graph
                .add_edge(source, target, read_edge_data(element))
                .map_err(|cause| SerializerError::InvalidEdge { ordinal, cause })?;
        }

        debug!(
            version,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Deserialized document"
        );
        Ok(document)
    }

    /// Parse a document from XML text
    pub fn load_str<N: NodeModel>(&self, xml: &str) -> SerializerResult<Document<N>> {
        let tree = XmlTree::parse(xml)?;
        self.from_xml(&tree)
    }

    /// Read and parse a whole document from `reader`
    pub fn load<N: NodeModel, R: Read>(&self, mut reader: R) -> SerializerResult<Document<N>> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| SerializerError::CannotOpenFile {
                path: PathBuf::from(STREAM_SOURCE),
                source,
            })?;
        let xml = String::from_utf8(bytes)
            .map_err(|err| SerializerError::CorruptedFile(format!("invalid UTF-8: {err}")))?;
        self.load_str(&xml)
    }

    /// Load the document stored at `path` and remember the path on it
    pub fn load_from_path<N: NodeModel>(&self, path: impl AsRef<Path>) -> SerializerResult<Document<N>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SerializerError::CannotOpenFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut document: Document<N> = self.load(file).map_err(|err| match err {
            SerializerError::CannotOpenFile { source, .. } => SerializerError::CannotOpenFile {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        document.set_file_name(path);
        info!(
            path = %path.display(),
            version = document.version(),
            nodes = document.graph().node_count(),
            "Loaded document"
        );
        Ok(document)
    }

    fn write_node<N: NodeModel>(&self, index: NodeIndex, node: &N) -> XmlElement {
        let location = node.location();
        let mut element = XmlElement::new(node::ELEMENT);
        element.set_attribute(node::INDEX, index.0);
        element.set_attribute(node::X, coords::encode(location.x, self.config.scale));
        element.set_attribute(node::Y, coords::encode(location.y, self.config.scale));
        element.append_child(text_element(node::TEXT, node.text()));
        element
    }

    fn read_node<N: NodeModel>(&self, element: &XmlElement) -> N {
        let mut node = N::default();

        if let Some(index) = element.attribute(node::INDEX).and_then(parse_index) {
            node.set_index(index);
        }

        let x = read_coordinate(element, node::X);
        let y = read_coordinate(element, node::Y);
        node.set_location(Point::new(
            coords::decode(x, self.config.scale),
            coords::decode(y, self.config.scale),
        ));

        // A later text element overrides an earlier one
        if let Some(text) = element
            .child_elements()
            .filter(|child| child.name() == node::TEXT)
            .last()
        {
            node.set_text(text.first_text().unwrap_or_default().to_string());
        }

        node
    }
}

fn text_element(name: &str, text: &str) -> XmlElement {
    let mut element = XmlElement::new(name);
    if !text.is_empty() {
        element.append_text(text);
    }
    element
}

fn write_edge(edge: &Edge) -> XmlElement {
    let mut element = XmlElement::new(edge::ELEMENT);
    element.set_attribute(edge::SOURCE, edge.source().0);
    element.set_attribute(edge::TARGET, edge.target().0);
    element.set_attribute(edge::ARROW_MODE, edge.data.arrow_mode);
    element.set_attribute(edge::REVERSED, edge.data.reversed);
    element.set_attribute(edge::DASHED, edge.data.dashed);
    element.append_child(text_element(edge::TEXT, &edge.data.text));
    element
}

/// Missing, negative or non-numeric indices mean "unassigned"
fn parse_index(value: &str) -> Option<NodeIndex> {
    let value = value.trim();
    if let Ok(index) = value.parse::<u64>() {
        return Some(NodeIndex(index));
    }
    if value.parse::<i64>().is_err() {
        warn!(value, "Ignoring unparseable node index");
    }
    None
}

fn read_coordinate(element: &XmlElement, attribute: &'static str) -> i64 {
    match element.attribute(attribute) {
        None => 0,
        Some(value) => value.trim().parse::<i64>().unwrap_or_else(|_| {
            warn!(attribute, value, "Unparseable coordinate, using 0");
            0
        }),
    }
}

fn read_endpoint(
    element: &XmlElement,
    attribute: &'static str,
    ordinal: usize,
) -> SerializerResult<NodeIndex> {
    element
        .attribute(attribute)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(NodeIndex)
        .ok_or(SerializerError::MissingEdgeEndpoint { ordinal, attribute })
}

fn read_edge_data(element: &XmlElement) -> EdgeData {
    let arrow_mode = match element.attribute(edge::ARROW_MODE) {
        None => ArrowMode::default(),
        Some(value) => value.parse::<ArrowMode>().unwrap_or_else(|err| {
            warn!(%err, "Falling back to default arrow mode");
            ArrowMode::default()
        }),
    };

    let text = element
        .child_elements()
        .filter(|child| child.name() == edge::TEXT)
        .last()
        .and_then(XmlElement::first_text)
        .unwrap_or_default()
        .to_string();

    EdgeData {
        arrow_mode,
        reversed: read_flag(element, edge::REVERSED),
        dashed: read_flag(element, edge::DASHED),
        text,
    }
}

fn read_flag(element: &XmlElement, attribute: &'static str) -> bool {
    match element.attribute(attribute).map(str::trim) {
        None | Some("false") | Some("0") => false,
        Some("true") | Some("1") => true,
        Some(value) => {
            warn!(attribute, value, "Unparseable flag, using false");
            false
        }
    }
}
