//! structural self checks
use super::Bst;
use crate::{
    compare::Compare,
    error::Error,
    node::{NodeId, Side},
};
use core::cmp::Ordering;
use fnv::{FnvHashMap, FnvHashSet};
use smallvec::SmallVec;
use tracing::*;

impl<T, C: Compare<T>> Bst<T, C> {
    /// Collect a message for every violated invariant.
    ///
    /// With `balanced` the stored balance factors are checked against the real subtree heights,
    /// and must not exceed 1 in magnitude.
    pub(super) fn audit(&self, balanced: bool) -> Vec<String> {
        let mut msgs = Vec::new();
        let root = match self.root {
            Some(root) => root,
            None => {
                if self.len() != 0 {
                    msgs.push(format!("empty tree with {} live nodes", self.len()));
                }
                return msgs;
            }
        };
        if let Some(parent) = self.nodes[root].parent {
            msgs.push(format!("root {} has parent {}", root, parent));
        }

        // links, pre-order
        let mut seen: FnvHashSet<NodeId> = FnvHashSet::default();
        let mut stack: SmallVec<[NodeId; 32]> = SmallVec::new();
        stack.push(root);
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                msgs.push(format!("{} is reachable twice", id));
                continue;
            }
            for side in [Side::Left, Side::Right] {
                if let Some(child) = self.nodes.child(id, side) {
                    match self.nodes.get(child) {
                        None => msgs.push(format!("{} links to free slot {}", id, child)),
                        Some(node) if node.parent != Some(id) => msgs.push(format!(
                            "{} is the {:?} child of {} but has parent {:?}",
                            child, side, id, node.parent
                        )),
                        Some(_) => stack.push(child),
                    }
                }
            }
        }
        if seen.len() != self.len() {
            msgs.push(format!(
                "{} nodes reachable from the root, {} live",
                seen.len(),
                self.len()
            ));
        }
        if !msgs.is_empty() {
            // the remaining checks walk the links and might not terminate
            return msgs;
        }

        // order, by walking successor links
        let mut count = 0;
        let mut prev: Option<NodeId> = None;
        let mut current = self.first_id();
        while let Some(id) = current {
            count += 1;
            if let Some(prev) = prev {
                let order = self.cmp.compare(self.nodes[prev].key(), self.nodes[id].key());
                if order != Ordering::Less {
                    msgs.push(format!("{} is {:?} its successor {}", prev, order, id));
                }
            }
            prev = Some(id);
            current = self.nodes.successor(id);
        }
        if count != self.len() {
            msgs.push(format!("in-order walk visits {} of {} nodes", count, self.len()));
        }
        if prev != self.last_id() {
            msgs.push("in-order walk does not end at the rightmost node".into());
        }
        let backwards = self.iter().rev().count();
        if backwards != self.len() {
            msgs.push(format!(
                "backward iteration yields {} of {} keys",
                backwards,
                self.len()
            ));
        }

        if balanced {
            self.audit_balance(root, &mut msgs);
        } else {
            for &id in &seen {
                if self.nodes[id].balance != 0 {
                    msgs.push(format!("{} of an unbalanced tree has balance factor", id));
                }
            }
        }
        msgs
    }

    /// compare stored balance factors with heights from a post-order pass
    fn audit_balance(&self, root: NodeId, msgs: &mut Vec<String>) {
        let mut heights: FnvHashMap<NodeId, i32> = FnvHashMap::default();
        let height_of =
            |heights: &FnvHashMap<NodeId, i32>, id: Option<NodeId>| id.map_or(-1, |id| heights[&id]);
        let mut stack: SmallVec<[(NodeId, bool); 32]> = SmallVec::new();
        stack.push((root, false));
        while let Some((id, expanded)) = stack.pop() {
            let node = &self.nodes[id];
            if !expanded {
                stack.push((id, true));
                stack.extend(node.left.map(|child| (child, false)));
                stack.extend(node.right.map(|child| (child, false)));
                continue;
            }
            let left = height_of(&heights, node.left);
            let right = height_of(&heights, node.right);
            let actual = right - left;
            if actual != i32::from(node.balance) {
                msgs.push(format!(
                    "{} stores balance factor {} but has {}",
                    id, node.balance, actual
                ));
            }
            if actual.abs() > 1 {
                msgs.push(format!("{} is out of balance: {}", id, actual));
            }
            heights.insert(id, left.max(right) + 1);
        }
    }
}

/// log every message and panic
pub(super) fn report(msgs: Vec<String>) {
    for msg in &msgs {
        error!("invariant violated: {}", msg);
    }
    panic!("{} invariant(s) violated: {}", msgs.len(), msgs.join("; "));
}

pub(super) fn to_result(msgs: Vec<String>) -> Result<(), Error> {
    if msgs.is_empty() {
        Ok(())
    } else {
        Err(Error::InvariantViolation(msgs.join("; ")))
    }
}
