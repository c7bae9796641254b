use serde::{Deserialize, Serialize};

use crate::types::{NodeIndex, Point};

/// Capability set every node stored in a [`Graph`](crate::Graph) must provide.
///
/// The graph and the document serializer only talk to nodes through this
/// trait, so an embedding application can store its own node type (one that
/// also carries presentation state, for example) as long as it exposes an
/// index, a location and a text.
///
/// `Default` is required so loaders can construct a blank node before
/// filling in the fields read from a document.
pub trait NodeModel: Default {
    /// The node's identity, or `None` while it has not been inserted yet
    fn index(&self) -> Option<NodeIndex>;

    /// Assign the node's identity.
    ///
    /// The graph calls this once on insertion. Changing the index of a node
    /// that already lives in a graph does not re-key it.
    fn set_index(&mut self, index: NodeIndex);

    fn location(&self) -> Point;

    fn set_location(&mut self, location: Point);

    fn text(&self) -> &str;

    fn set_text(&mut self, text: String);
}

/// Standard mind-map node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    index: Option<NodeIndex>,
    /// Position in document coordinates
    pub location: Point,
    /// Label content, may be empty
    #[serde(default)]
    pub text: String,
}

impl Node {
    /// Create an unindexed node; the graph assigns the index on insertion
    pub fn new(location: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            index: None,
            location: location.into(),
            text: text.into(),
        }
    }

    /// Pin the node to an explicit index
    pub fn with_index(mut self, index: impl Into<NodeIndex>) -> Self {
        self.index = Some(index.into());
        self
    }
}

impl NodeModel for Node {
    fn index(&self) -> Option<NodeIndex> {
        self.index
    }

    fn set_index(&mut self, index: NodeIndex) {
        self.index = Some(index);
    }

    fn location(&self) -> Point {
        self.location
    }

    fn set_location(&mut self, location: Point) {
        self.location = location;
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }
}
