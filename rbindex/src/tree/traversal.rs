use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::{Node, NodeId};

/// Depth-first visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, node, right subtree; ascending key order.
    InOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

// A pending visit: `expanded` nodes have had their children scheduled and only
// need to be emitted.
type Frame = (NodeId, bool);

/// Lazy depth-first walk over the records of a tree.
///
/// Uses an explicit stack, so walk depth does not grow the call stack. The
/// iterator knows how many records remain and is fused.
pub struct Traversal<'a, R> {
    nodes: &'a [Node<R>],
    order: Order,
    stack: SmallVec<[Frame; 32]>,
    remaining: usize,
}

impl<'a, R> Traversal<'a, R> {
    pub(crate) fn new(nodes: &'a [Node<R>], root: Option<NodeId>, count: usize, order: Order) -> Self {
        let mut stack = SmallVec::new();
        if let Some(root) = root {
            stack.push((root, false));
        }
        Traversal {
            nodes,
            order,
            stack,
            remaining: count,
        }
    }

    /// The order this traversal visits records in.
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    fn schedule(&mut self, child: Option<NodeId>) {
        if let Some(child) = child {
            self.stack.push((child, false));
        }
    }

    #[inline]
    fn emit(&mut self, id: NodeId) -> Option<&'a R> {
        let nodes = self.nodes;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&nodes[id].record)
    }
}

impl<'a, R> Iterator for Traversal<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, expanded)) = self.stack.pop() {
            if expanded {
                return self.emit(id);
            }

            let (left, right) = (self.nodes[id].left, self.nodes[id].right);
            match self.order {
                Order::PreOrder => {
                    self.schedule(right);
                    self.schedule(left);
                    return self.emit(id);
                }
                Order::InOrder => {
                    self.schedule(right);
                    self.stack.push((id, true));
                    self.schedule(left);
                }
                Order::PostOrder => {
                    self.stack.push((id, true));
                    self.schedule(right);
                    self.schedule(left);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R> ExactSizeIterator for Traversal<'_, R> {}

impl<R> FusedIterator for Traversal<'_, R> {}
