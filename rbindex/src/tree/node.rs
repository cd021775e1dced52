/// Index of a node in the tree's arena.
pub(crate) type NodeId = usize;

/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    #[inline]
    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

/// Which child slot of a node. Lets every mirrored branch of the balancing
/// code be written once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A vertex of the tree.
///
/// `left` and `right` are the owning edges of the tree shape; `parent` is a
/// back-reference used only while rotating and rebalancing. An absent child is
/// `None` and counts as black.
#[derive(Debug, Clone)]
pub(crate) struct Node<R> {
    pub(crate) record: R,
    pub(crate) color: Color,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<R> Node<R> {
    /// New nodes are red leaves.
    pub(crate) fn new(record: R, parent: Option<NodeId>) -> Self {
        Node {
            record,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_red_leaf() {
        let node = Node::new("a", Some(3));
        assert_eq!(node.color, Color::Red);
        assert_eq!(node.left, None);
        assert_eq!(node.right, None);
        assert_eq!(node.parent, Some(3));
    }

    #[test]
    fn test_child_by_side() {
        let mut node = Node::new(1, None);
        node.set_child(Side::Left, Some(4));
        node.set_child(Side::Right, Some(5));
        assert_eq!(node.child(Side::Left), Some(4));
        assert_eq!(node.child(Side::Right), Some(5));

        node.set_child(Side::Left, None);
        assert_eq!(node.left, None);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    #[test]
    fn test_color_predicates() {
        assert!(Color::Red.is_red());
        assert!(Color::Black.is_black());
        assert!(!Color::Black.is_red());
    }
}
