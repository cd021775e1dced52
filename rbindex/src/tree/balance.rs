use super::{Color, NodeId, RedBlackTree, Side};

impl<R> RedBlackTree<R> {
    /// Color of a possibly absent node; absent children are black.
    #[inline]
    pub(crate) fn color_of(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.nodes[id].color)
    }

    /// Which child slot of `parent` holds `child`.
    #[inline]
    fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        if self.nodes[parent].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    #[inline]
    fn paint(&mut self, id: NodeId, color: Color) {
        let node = &mut self.nodes[id];
        if node.color != color {
            node.color = color;
            self.stats.recolorings += 1;
        }
    }

    /// Rotates the subtree rooted at `x` towards `side`.
    ///
    /// `rotate(x, Side::Left)` is the classic left rotation: the right child
    /// `y` of `x` takes its place, `x` becomes the left child of `y`, and the
    /// former left subtree of `y` moves across to become the right subtree of
    /// `x`. In-order key sequence and colors are unchanged. Does nothing if
    /// `x` has no child on the opposite side.
    pub(crate) fn rotate(&mut self, x: NodeId, side: Side) {
        let outer = side.opposite();
        let Some(y) = self.nodes[x].child(outer) else {
            return;
        };

        let moved = self.nodes[y].child(side);
        self.nodes[x].set_child(outer, moved);
        if let Some(moved) = moved {
            self.nodes[moved].parent = Some(x);
        }

        let parent = self.nodes[x].parent;
        self.nodes[y].parent = parent;
        match parent {
            None => self.root = Some(y),
            Some(parent) => {
                let slot = self.side_of(parent, x);
                self.nodes[parent].set_child(slot, Some(y));
            }
        }

        self.nodes[y].set_child(side, Some(x));
        self.nodes[x].parent = Some(y);

        self.stats.rotations += 1;
        log::trace!("Rotated {:?} at node {} (new subtree root {})", side, x, y);
    }

    /// Restores the red-black invariants after `k` was linked in as a red leaf.
    ///
    /// On entry the only possible violation is a red `k` under a red parent.
    /// Each pass either pushes that violation two levels up by recoloring
    /// (red uncle) or removes it with one or two rotations (black uncle).
    pub(crate) fn fix_after_insert(&mut self, mut k: NodeId) {
        while let Some(parent) = self.nodes[k].parent {
            if self.nodes[parent].color.is_black() {
                break;
            }

            // a red parent is never the root, so the grandparent exists
            let Some(grandparent) = self.nodes[parent].parent else {
                break;
            };
            let parent_side = self.side_of(grandparent, parent);
            let uncle = self.nodes[grandparent].child(parent_side.opposite());

            if let (Some(uncle), Color::Red) = (uncle, self.color_of(uncle)) {
                self.paint(parent, Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(grandparent, Color::Red);
                k = grandparent;
                continue;
            }

            // inner child: turn it into the outer configuration first
            let mut parent = parent;
            if self.side_of(parent, k) != parent_side {
                self.rotate(parent, parent_side);
                std::mem::swap(&mut k, &mut parent);
            }

            self.paint(parent, Color::Black);
            self.paint(grandparent, Color::Red);
            self.rotate(grandparent, parent_side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.paint(root, Color::Black);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{KeyedRecord, Record};
    use crate::tree::{Color, Node, NodeId, Order, RedBlackTree, Side};

    type Tree = RedBlackTree<KeyedRecord<i32, ()>>;

    //     2
    //    / \
    //   1   4
    //      / \
    //     3   5
    // built by hand, all black, without balancing
    fn hand_built() -> Tree {
        fn push(tree: &mut Tree, key: i32, parent: Option<NodeId>) -> NodeId {
            let id = tree.nodes.len();
            let mut node = Node::new(KeyedRecord::new(key, ()), parent);
            node.color = Color::Black;
            tree.nodes.push(node);
            id
        }

        let mut tree = Tree::new();
        let two = push(&mut tree, 2, None);
        let one = push(&mut tree, 1, Some(two));
        let four = push(&mut tree, 4, Some(two));
        let three = push(&mut tree, 3, Some(four));
        let five = push(&mut tree, 5, Some(four));
        tree.nodes[two].left = Some(one);
        tree.nodes[two].right = Some(four);
        tree.nodes[four].left = Some(three);
        tree.nodes[four].right = Some(five);
        tree.root = Some(two);
        tree.count = 5;
        tree
    }

    fn keys(tree: &Tree, order: Order) -> Vec<i32> {
        tree.traverse(order).map(|r| *r.key()).collect()
    }

    #[test]
    fn test_rotate_left_at_root() {
        let mut tree = hand_built();
        let root = tree.root.unwrap();
        tree.rotate(root, Side::Left);

        assert_eq!(keys(&tree, Order::PreOrder), vec![4, 2, 1, 3, 5]);
        assert_eq!(keys(&tree, Order::InOrder), vec![1, 2, 3, 4, 5]);

        let new_root = tree.root.unwrap();
        assert_eq!(*tree.nodes[new_root].record.key(), 4);
        assert_eq!(tree.nodes[new_root].parent, None);

        // 3 moved across and must point back at 2
        let three = tree.nodes[root].right.unwrap();
        assert_eq!(*tree.nodes[three].record.key(), 3);
        assert_eq!(tree.nodes[three].parent, Some(root));
        assert_eq!(tree.nodes[root].parent, Some(new_root));
        assert_eq!(tree.stats().rotations, 1);
    }

    #[test]
    fn test_rotate_right_undoes_rotate_left() {
        let mut tree = hand_built();
        let before = keys(&tree, Order::PreOrder);
        let root = tree.root.unwrap();
        tree.rotate(root, Side::Left);
        let new_root = tree.root.unwrap();
        tree.rotate(new_root, Side::Right);

        assert_eq!(keys(&tree, Order::PreOrder), before);
        assert_eq!(tree.root, Some(root));
        assert_eq!(tree.stats().rotations, 2);
    }

    #[test]
    fn test_rotate_below_root_relinks_grandparent() {
        let mut tree = hand_built();
        let root = tree.root.unwrap();
        let four = tree.nodes[root].right.unwrap();
        tree.rotate(four, Side::Right);

        assert_eq!(keys(&tree, Order::PreOrder), vec![2, 1, 3, 4, 5]);
        let three = tree.nodes[root].right.unwrap();
        assert_eq!(tree.nodes[three].parent, Some(root));
        assert_eq!(tree.nodes[four].parent, Some(three));
        assert_eq!(tree.root, Some(root));
    }

    #[test]
    fn test_rotate_without_child_is_noop() {
        let mut tree = hand_built();
        let one = tree.nodes[tree.root.unwrap()].left.unwrap();
        tree.rotate(one, Side::Left);
        assert_eq!(keys(&tree, Order::PreOrder), vec![2, 1, 4, 3, 5]);
        assert_eq!(tree.stats().rotations, 0);
    }

    #[test]
    fn test_rotation_keeps_colors() {
        let mut tree = hand_built();
        let root = tree.root.unwrap();
        let colors: Vec<Color> = tree.nodes.iter().map(|n| n.color).collect();
        tree.rotate(root, Side::Left);
        let after: Vec<Color> = tree.nodes.iter().map(|n| n.color).collect();
        assert_eq!(colors, after);
    }

    #[test]
    fn test_outer_case_rotates_once() {
        let mut tree = Tree::new();
        for key in [10, 20, 30] {
            tree.insert(KeyedRecord::new(key, ())).unwrap();
        }
        assert_eq!(tree.stats().rotations, 1);
        assert_eq!(keys(&tree, Order::PreOrder), vec![20, 10, 30]);
    }

    #[test]
    fn test_inner_case_rotates_twice() {
        let mut tree = Tree::new();
        for key in [10, 30, 20] {
            tree.insert(KeyedRecord::new(key, ())).unwrap();
        }
        assert_eq!(tree.stats().rotations, 2);
        assert_eq!(keys(&tree, Order::PreOrder), vec![20, 10, 30]);
        assert_eq!(tree.color_of_key(&20), Some(Color::Black));
        assert_eq!(tree.color_of_key(&10), Some(Color::Red));
        assert_eq!(tree.color_of_key(&30), Some(Color::Red));
    }

    #[test]
    fn test_mirror_inner_case_rotates_twice() {
        let mut tree = Tree::new();
        for key in [30, 10, 20] {
            tree.insert(KeyedRecord::new(key, ())).unwrap();
        }
        assert_eq!(tree.stats().rotations, 2);
        assert_eq!(keys(&tree, Order::PreOrder), vec![20, 10, 30]);
    }

    #[test]
    fn test_red_uncle_recolors_without_rotation() {
        let mut tree = Tree::new();
        for key in [20, 10, 30] {
            tree.insert(KeyedRecord::new(key, ())).unwrap();
        }
        let rotations = tree.stats().rotations;
        tree.insert(KeyedRecord::new(5, ())).unwrap();

        assert_eq!(tree.stats().rotations, rotations);
        assert_eq!(tree.color_of_key(&10), Some(Color::Black));
        assert_eq!(tree.color_of_key(&30), Some(Color::Black));
        assert_eq!(tree.color_of_key(&5), Some(Color::Red));
        // grandparent turned red then was forced back to black as root
        assert_eq!(tree.color_of_key(&20), Some(Color::Black));
    }

    #[test]
    fn test_at_most_two_rotations_per_insert() {
        let mut tree = Tree::new();
        for key in (0..500).map(|i| (i * 7919) % 1009) {
            let before = tree.stats().rotations;
            tree.insert(KeyedRecord::new(key, ())).unwrap();
            assert!(tree.stats().rotations - before <= 2);
        }
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_color_of_absent_is_black() {
        let tree = Tree::new();
        assert_eq!(tree.color_of(None), Color::Black);
    }
}
