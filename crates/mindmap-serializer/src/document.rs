use mindmap_graph::{Graph, Node, NodeModel};
use std::path::{Path, PathBuf};

/// A mind map: one graph plus the version tag it was saved with
#[derive(Debug, Clone)]
pub struct Document<N = Node> {
    version: String,
    graph: Graph<N>,
    file_name: Option<PathBuf>,
}

impl<N: NodeModel> Document<N> {
    /// Create an empty document
    pub fn new(version: impl Into<String>) -> Self {
        Self::with_graph(version, Graph::new())
    }

    pub fn with_graph(version: impl Into<String>, graph: Graph<N>) -> Self {
        Self {
            version: version.into(),
            graph,
            file_name: None,
        }
    }

    /// Format/application version tag. Metadata only.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    pub fn graph(&self) -> &Graph<N> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph<N> {
        &mut self.graph
    }

    pub fn into_graph(self) -> Graph<N> {
        self.graph
    }

    /// Path the document was last loaded from or saved to
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, file_name: impl Into<PathBuf>) {
        self.file_name = Some(file_name.into());
    }
}
