use itertools::Itertools;
use smallvec::SmallVec;

use super::{Color, NodeId, RedBlackTree};
use crate::errors::{ErrorKind, IndexError, IndexResult};
use crate::record::Record;

/// Counters of the structural work done by insertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Rotations performed by the insertion fix-up.
    pub rotations: u64,
    /// Color changes applied, including forcing the root black.
    pub recolorings: u64,
}

/// Shape summary returned by a successful invariant check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeReport {
    /// Number of records reached from the root.
    pub size: usize,
    /// Nodes on the longest root-to-leaf path.
    pub height: usize,
    /// Black nodes on every root-to-leaf path, the root included.
    pub black_height: usize,
}

impl<R> RedBlackTree<R> {
    /// Number of nodes on the longest path from the root down to a leaf;
    /// zero for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: SmallVec<[(NodeId, usize); 32]> = SmallVec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    /// Counts the nodes reachable from the root by walking the whole tree.
    ///
    /// Always equal to [`size`](Self::size), which is the `O(1)` form.
    pub fn count_nodes(&self) -> usize {
        self.count_from(self.root)
    }

    fn count_from(&self, id: Option<NodeId>) -> usize {
        match id {
            None => 0,
            Some(id) => {
                let node = &self.nodes[id];
                1 + self.count_from(node.left) + self.count_from(node.right)
            }
        }
    }
}

impl<R: Record> RedBlackTree<R> {
    /// Walks the whole tree and verifies every red-black and ordering
    /// invariant, the parent back-links and the stored record count.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvariantViolation`] describing the first broken
    /// property found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbindex::record::KeyedRecord;
    /// use rbindex::tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// for key in 0..100 {
    ///     tree.insert(KeyedRecord::new(key, ()))?;
    /// }
    /// let report = tree.check_invariants()?;
    /// assert_eq!(report.size, 100);
    /// assert!(report.height <= 2 * 7);
    /// # Ok::<(), rbindex::errors::IndexError>(())
    /// ```
    pub fn check_invariants(&self) -> IndexResult<TreeReport> {
        let Some(root) = self.root else {
            if self.count != 0 {
                return Err(violation(format!(
                    "empty tree reports {} records",
                    self.count
                )));
            }
            return Ok(TreeReport::default());
        };

        if self.nodes[root].parent.is_some() {
            return Err(violation("root has a parent link".to_string()));
        }
        if self.nodes[root].color != Color::Black {
            return Err(violation("root is red".to_string()));
        }

        let mut size = 0;
        let black_height = self.check_subtree(root, &mut size)?;

        if size != self.count {
            return Err(violation(format!(
                "{} nodes reachable but size is {}",
                size, self.count
            )));
        }
        if self.nodes.len() != self.count {
            return Err(violation(format!(
                "{} nodes allocated but size is {}",
                self.nodes.len(),
                self.count
            )));
        }

        let ascending = self
            .iter()
            .tuple_windows()
            .all(|(left, right)| left.key() < right.key());
        if !ascending {
            return Err(violation(
                "in-order keys are not strictly ascending".to_string(),
            ));
        }

        Ok(TreeReport {
            size,
            height: self.height(),
            black_height,
        })
    }

    // Returns the number of black nodes on every path from `id` down,
    // `id` included.
    fn check_subtree(&self, id: NodeId, size: &mut usize) -> IndexResult<usize> {
        *size += 1;
        let node = &self.nodes[id];

        let mut heights = [0usize; 2];
        for (slot, child) in [node.left, node.right].into_iter().enumerate() {
            let Some(child) = child else {
                continue;
            };
            let child_node = &self.nodes[child];
            if child_node.parent != Some(id) {
                return Err(violation(format!(
                    "node {} does not point back at its parent {}",
                    child, id
                )));
            }
            if node.color.is_red() && child_node.color.is_red() {
                return Err(violation(format!(
                    "red node {} has red child {}",
                    id, child
                )));
            }
            heights[slot] = self.check_subtree(child, size)?;
        }

        if heights[0] != heights[1] {
            return Err(violation(format!(
                "black heights differ below node {} ({} left, {} right)",
                id, heights[0], heights[1]
            )));
        }

        Ok(heights[0] + usize::from(node.color.is_black()))
    }
}

fn violation(message: String) -> IndexError {
    IndexError::new(&message, ErrorKind::InvariantViolation)
}
