//! sideways text rendering of the tree shape
use super::Bst;
use crate::node::NodeId;
use core::fmt::{self, Write};

impl<T: fmt::Debug, C> Bst<T, C> {
    /// Render the shape of the tree sideways, one key per line.
    ///
    /// ```text
    /// └── 4
    ///     ├── 2
    ///     │   ├── 1
    ///     │   └── 3
    ///     └── 5
    /// ```
    ///
    /// The left child of a node comes first. An empty tree renders as `└── #`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // writing to a String does not fail
        let _ = self.write_dump(&mut out);
        out
    }

    fn write_dump(&self, out: &mut impl Write) -> fmt::Result {
        let root = match self.root {
            Some(root) => root,
            None => return writeln!(out, "└── #"),
        };
        let mut stack: Vec<(NodeId, String, bool)> = vec![(root, String::new(), false)];
        while let Some((id, prefix, is_left)) = stack.pop() {
            let node = &self.nodes[id];
            let branch = if is_left { "├── " } else { "└── " };
            writeln!(out, "{}{}{:?}", prefix, branch, node.key())?;
            let below = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
            if let Some(right) = node.right {
                stack.push((right, below.clone(), false));
            }
            if let Some(left) = node.left {
                stack.push((left, below, true));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::{AvlTree, Bst};

    #[test]
    fn empty() {
        assert_eq!(Bst::<i32>::new().dump(), "└── #\n");
    }

    #[test]
    fn balanced_shape() {
        let tree: AvlTree<i32> = (1..=5).collect();
        assert_eq!(
            tree.dump(),
            "└── 2\n    ├── 1\n    └── 4\n        ├── 3\n        └── 5\n"
        );
    }

    #[test]
    fn left_subtrees_continue_the_rail() {
        let tree: Bst<i32> = Bst::from([4, 2, 5, 1, 3]);
        assert_eq!(
            tree.dump(),
            "└── 4\n    ├── 2\n    │   ├── 1\n    │   └── 3\n    └── 5\n"
        );
    }

    #[test]
    fn absent_children_are_skipped() {
        let tree: Bst<&str> = Bst::from(["b", "c"]);
        assert_eq!(tree.dump(), "└── \"b\"\n    └── \"c\"\n");
    }
}
