use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::edge::{Edge, EdgeData};
use crate::error::GraphError;
use crate::node::{Node, NodeModel};
use crate::types::{EdgeId, NodeIndex};

/// Directed graph of nodes and edges with referential integrity.
///
/// The graph owns its nodes; edges refer to them by [`NodeIndex`]. Every
/// mutation either succeeds completely or returns a [`GraphError`] and leaves
/// the graph untouched.
///
/// Nodes are kept ordered by index and edges by id, so iteration order is
/// stable and reproducible.
#[derive(Debug, Clone)]
pub struct Graph<N = Node> {
    nodes: BTreeMap<NodeIndex, N>,
    edges: BTreeMap<EdgeId, Edge>,
    // One past the highest node index ever inserted
    next_node_index: u64,
    next_edge_id: u64,
}

impl<N: NodeModel> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeModel> Graph<N> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            next_node_index: 0,
            next_edge_id: 0,
        }
    }

    /// Insert a node and return its index.
    ///
    /// A node without an index gets the next unused one. Indices are not
    /// reused after removal.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateIndex`] if the node carries an index that a live
    /// node already has.
    pub fn add_node(&mut self, mut node: N) -> Result<NodeIndex, GraphError> {
        let index = match node.index() {
            Some(index) if self.nodes.contains_key(&index) => {
                return Err(GraphError::DuplicateIndex(index));
            }
            Some(index) => index,
            None => {
                let index = self.allocate_index();
                node.set_index(index);
                index
            }
        };

        self.next_node_index = self.next_node_index.max(index.0.saturating_add(1));
        self.nodes.insert(index, node);
        debug!(node = %index, "Added node");
        Ok(index)
    }

    fn allocate_index(&self) -> NodeIndex {
        let candidate = NodeIndex(self.next_node_index);
        if !self.nodes.contains_key(&candidate) {
            return candidate;
        }
        // Only reachable once the counter has saturated at u64::MAX
        (0..=u64::MAX)
            .map(NodeIndex)
            .find(|index| !self.nodes.contains_key(index))
            .unwrap_or(candidate)
    }

    pub fn get_node(&self, index: NodeIndex) -> Result<&N, GraphError> {
        self.nodes.get(&index).ok_or(GraphError::NodeNotFound(index))
    }

    /// Mutable access to a node.
    ///
    /// The node must keep its index. Calling [`NodeModel::set_index`] through
    /// this reference desynchronizes it from the graph; use
    /// [`Graph::update_node`] when that cannot be ruled out.
    pub fn get_node_mut(&mut self, index: NodeIndex) -> Result<&mut N, GraphError> {
        self.nodes.get_mut(&index).ok_or(GraphError::NodeNotFound(index))
    }

    /// Run `update` on a node, then restore the index it is stored under
    pub fn update_node<R>(
        &mut self,
        index: NodeIndex,
        update: impl FnOnce(&mut N) -> R,
    ) -> Result<R, GraphError> {
        let node = self.nodes.get_mut(&index).ok_or(GraphError::NodeNotFound(index))?;
        let result = update(node);
        if node.index() != Some(index) {
            warn!(node = %index, "Node index changed during update, restoring it");
            node.set_index(index);
        }
        Ok(result)
    }

    pub fn contains_node(&self, index: NodeIndex) -> bool {
        self.nodes.contains_key(&index)
    }

    /// Remove a node together with every edge that starts or ends at it.
    ///
    /// Returns the detached node.
    pub fn remove_node(&mut self, index: NodeIndex) -> Result<N, GraphError> {
        let node = self.nodes.remove(&index).ok_or(GraphError::NodeNotFound(index))?;

        let before = self.edges.len();
        self.edges.retain(|_, edge| !edge.touches(index));
        debug!(
            node = %index,
            removed_edges = before - self.edges.len(),
            "Removed node"
        );

        Ok(node)
    }

    /// Connect `source` to `target` and return the new edge's id.
    ///
    /// # Errors
    ///
    /// * [`GraphError::NodeNotFound`] if either endpoint is not in the graph
    /// * [`GraphError::DuplicateEdge`] if `source -> target` already exists
    pub fn add_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        data: EdgeData,
    ) -> Result<EdgeId, GraphError> {
        for endpoint in [source, target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::NodeNotFound(endpoint));
            }
        }

        if self
            .edges
            .values()
            .any(|edge| edge.source() == source && edge.target() == target)
        {
            return Err(GraphError::DuplicateEdge { from: source, to: target });
        }

        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.insert(id, Edge::new(id, source, target, data));
        debug!(edge = %id, %source, %target, "Added edge");
        Ok(id)
    }

    pub fn get_edge(&self, id: EdgeId) -> Result<&Edge, GraphError> {
        self.edges.get(&id).ok_or(GraphError::EdgeNotFound(id))
    }

    pub fn get_edge_mut(&mut self, id: EdgeId) -> Result<&mut Edge, GraphError> {
        self.edges.get_mut(&id).ok_or(GraphError::EdgeNotFound(id))
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge, GraphError> {
        let edge = self.edges.remove(&id).ok_or(GraphError::EdgeNotFound(id))?;
        debug!(edge = %id, "Removed edge");
        Ok(edge)
    }

    /// Nodes in ascending index order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &N)> + '_ {
        self.nodes.iter().map(|(index, node)| (*index, node))
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Edges whose source is `index`
    pub fn edges_from(&self, index: NodeIndex) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values().filter(move |edge| edge.source() == index)
    }

    /// Edges whose target is `index`
    pub fn edges_to(&self, index: NodeIndex) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values().filter(move |edge| edge.target() == index)
    }

    /// Whether an edge joins `a` and `b` in either direction
    pub fn are_directly_connected(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.edges.values().any(|edge| {
            (edge.source() == a && edge.target() == b) || (edge.source() == b && edge.target() == a)
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop all nodes and edges. Index counters keep running.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
