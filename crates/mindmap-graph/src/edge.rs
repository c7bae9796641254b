use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseArrowModeError;
use crate::types::{EdgeId, NodeIndex};

/// Which ends of an edge carry an arrowhead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowMode {
    /// Plain line
    None,
    /// Arrowhead at the target end (or the source end when reversed)
    #[default]
    Single,
    /// Arrowheads at both ends
    Double,
}

impl ArrowMode {
    /// The keyword used for this mode in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrowMode::None => "none",
            ArrowMode::Single => "single",
            ArrowMode::Double => "double",
        }
    }
}

impl fmt::Display for ArrowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrowMode {
    type Err = ParseArrowModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ArrowMode::None),
            "single" => Ok(ArrowMode::Single),
            "double" => Ok(ArrowMode::Double),
            other => Err(ParseArrowModeError(other.to_string())),
        }
    }
}

/// Style and label data carried by an edge
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(default)]
    pub arrow_mode: ArrowMode,
    /// Draw the arrow from target to source
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub dashed: bool,
    /// Free-text label
    #[serde(default)]
    pub text: String,
}

impl EdgeData {
    /// Edge data with default style and the given label
    pub fn labeled(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A directed connection between two nodes of the same graph.
///
/// Endpoints are held by index. The graph guarantees both exist for as long
/// as the edge does, which is why they cannot be changed after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    source: NodeIndex,
    target: NodeIndex,
    /// Style and label
    pub data: EdgeData,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, source: NodeIndex, target: NodeIndex, data: EdgeData) -> Self {
        Self { id, source, target, data }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn target(&self) -> NodeIndex {
        self.target
    }

    /// Whether `index` is either endpoint
    pub fn touches(&self, index: NodeIndex) -> bool {
        self.source == index || self.target == index
    }
}
