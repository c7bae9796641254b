use mindmap_graph::{EdgeData, Graph, GraphError, NodeIndex, NodeModel, Point};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;

/// Bare node type used to check that the graph only relies on `NodeModel`
#[derive(Debug, Default)]
struct MinimalNode {
    index: Option<NodeIndex>,
    location: Point,
    text: String,
}

impl NodeModel for MinimalNode {
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

fn minimal(index: Option<u64>) -> MinimalNode {
    MinimalNode {
        index: index.map(NodeIndex),
        ..MinimalNode::default()
    }
}

#[test_log::test]
fn test_graph_with_custom_node_type() {
    let mut graph: Graph<MinimalNode> = Graph::new();
    let a = graph.add_node(minimal(None)).unwrap();
    let b = graph.add_node(minimal(Some(5))).unwrap();
    graph.add_edge(a, b, EdgeData::default()).unwrap();

    assert_eq!(graph.get_node(a).unwrap().index(), Some(a));
    assert_eq!(graph.edges_from(a).count(), 1);

    graph.remove_node(b).unwrap();
    assert_eq!(graph.edge_count(), 0);
}

#[test_log::test]
fn test_failed_edge_insert_leaves_edge_set_unchanged() {
    let mut graph: Graph<MinimalNode> = Graph::new();
    let a = graph.add_node(minimal(None)).unwrap();
    let b = graph.add_node(minimal(None)).unwrap();
    let existing = graph.add_edge(a, b, EdgeData::labeled("keep")).unwrap();

    let err = graph.add_edge(b, NodeIndex(100), EdgeData::default()).unwrap_err();
    assert_eq!(err.error_code(), "ERR_GRAPH_NODE_NOT_FOUND");

    let ids: Vec<_> = graph.edges().map(|edge| edge.id()).collect();
    assert_eq!(ids, vec![existing]);
}

#[derive(Debug, Clone)]
enum Op {
    AddAuto,
    AddExplicit(u64),
    Remove(u64),
    Connect(u64, u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AddAuto),
        (0u64..20).prop_map(Op::AddExplicit),
        (0u64..20).prop_map(Op::Remove),
        ((0u64..20), (0u64..20)).prop_map(|(a, b)| Op::Connect(a, b)),
    ]
}

proptest! {
    #[test]
    fn prop_indices_unique_and_edges_resolve(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut graph: Graph<MinimalNode> = Graph::new();

        for op in ops {
            match op {
                Op::AddAuto => {
                    let index = graph.add_node(minimal(None)).unwrap();
                    prop_assert_eq!(graph.get_node(index).unwrap().index(), Some(index));
                }
                Op::AddExplicit(i) => {
                    let before = graph.node_count();
                    let existed = graph.contains_node(NodeIndex(i));
                    match graph.add_node(minimal(Some(i))) {
                        Ok(index) => {
                            prop_assert!(!existed);
                            prop_assert_eq!(index, NodeIndex(i));
                        }
                        Err(err) => {
                            prop_assert!(existed);
                            prop_assert_eq!(err, GraphError::DuplicateIndex(NodeIndex(i)));
                            prop_assert_eq!(graph.node_count(), before);
                        }
                    }
                }
                Op::Remove(i) => {
                    let _ = graph.remove_node(NodeIndex(i));
                    prop_assert!(graph.edges().all(|edge| !edge.touches(NodeIndex(i))));
                }
                Op::Connect(a, b) => {
                    let before = graph.edge_count();
                    let result = graph.add_edge(NodeIndex(a), NodeIndex(b), EdgeData::default());
                    if !graph.contains_node(NodeIndex(a)) || !graph.contains_node(NodeIndex(b)) {
                        prop_assert!(matches!(result, Err(GraphError::NodeNotFound(_))));
                        prop_assert_eq!(graph.edge_count(), before);
                    }
                }
            }

            let mut seen = HashSet::new();
            for (index, node) in graph.nodes() {
                prop_assert!(seen.insert(index));
                prop_assert_eq!(node.index(), Some(index));
            }
            for edge in graph.edges() {
                prop_assert!(graph.contains_node(edge.source()));
                prop_assert!(graph.contains_node(edge.target()));
            }
        }
    }
}
