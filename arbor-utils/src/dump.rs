use crate::error::Error;
use arbor::{node::Side, Bst};
use core::fmt::Debug;
use std::collections::BTreeMap;

type Node = usize;
type Edge = (usize, usize, Side);

struct TreeShape {
    labels: Vec<String>,
    edges: Vec<Edge>,
}

impl<'a> dot::Labeller<'a, Node, Edge> for TreeShape {
    fn graph_id(&'a self) -> dot::Id<'a> {
        dot::Id::new("arbor").unwrap()
    }

    fn node_id(&'a self, n: &Node) -> dot::Id<'a> {
        dot::Id::new(format!("N{}", n)).unwrap()
    }

    fn node_label(&'a self, n: &Node) -> dot::LabelText<'a> {
        dot::LabelText::label(self.labels[*n].as_str())
    }

    fn node_shape(&'a self, _n: &Node) -> Option<dot::LabelText<'a>> {
        Some(dot::LabelText::label("circle"))
    }

    fn edge_label(&'a self, e: &Edge) -> dot::LabelText<'a> {
        dot::LabelText::label(match e.2 {
            Side::Left => "L",
            Side::Right => "R",
        })
    }
}

impl<'a> dot::GraphWalk<'a, Node, Edge> for TreeShape {
    fn nodes(&'a self) -> dot::Nodes<'a, Node> {
        (0..self.labels.len()).collect()
    }

    fn edges(&'a self) -> dot::Edges<'a, Edge> {
        self.edges.iter().cloned().collect()
    }

    fn source(&'a self, edge: &Edge) -> Node {
        edge.0
    }

    fn target(&'a self, edge: &Edge) -> Node {
        edge.1
    }
}

/// Write the shape of a tree as graphviz dot. Can be piped directly into
/// `dot -Tpng -o tree.png`.
///
/// Every node is labelled with its key and balance factor, every edge with the side of the child.
pub fn graph<T: Debug, C>(tree: &Bst<T, C>, mut out: impl std::io::Write) -> Result<(), Error> {
    let mut index = BTreeMap::new();
    let mut labels = Vec::with_capacity(tree.len());
    let mut edges = Vec::new();
    let mut stack: Vec<_> = tree.root_id().into_iter().collect();
    while let Some(id) = stack.pop() {
        let node = tree.node(id);
        index.insert(id, labels.len());
        labels.push(format!("{:?} ({:+})", node.key(), node.balance()));
        for side in [Side::Right, Side::Left] {
            if let Some(child) = node.child(side) {
                stack.push(child);
            }
        }
    }
    for (&id, &from) in &index {
        for side in [Side::Left, Side::Right] {
            if let Some(child) = tree.node(id).child(side) {
                edges.push((from, index[&child], side));
            }
        }
    }
    let shape = TreeShape { labels, edges };
    dot::render(&shape, &mut out)?;
    Ok(())
}
