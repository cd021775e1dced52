//! The red-black tree engine.
//!
//! Nodes live in an arena owned by the tree and refer to each other by index.
//! The `left`/`right` links form the tree; the `parent` link is only read by
//! rotations and the insertion fix-up. An absent child (`None`) stands in for
//! the sentinel leaf and is always considered black.
//!
//! After every public operation the tree satisfies:
//!
//! 1. every node is red or black,
//! 2. the root is black,
//! 3. absent children are black,
//! 4. a red node has no red child,
//! 5. every path from a node to an absent descendant has the same number of
//!    black nodes,
//! 6. an in-order walk yields strictly ascending keys.
//!
//! [`RedBlackTree::check_invariants`] verifies all of these by walking the tree.

mod balance;
mod diagnostics;
mod node;
mod traversal;

pub use diagnostics::{TreeReport, TreeStats};
pub use node::Color;
pub use traversal::{Order, Traversal};

pub(crate) use node::{Node, NodeId, Side};

use crate::errors::{ErrorKind, IndexError, IndexResult};
use crate::record::Record;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// An in-memory ordered index of uniquely keyed records.
///
/// Insertion and lookup are `O(log n)`; the height never exceeds
/// `2 * log2(n + 1)`. There is no removal.
///
/// # Examples
///
/// ```rust
/// use rbindex::record::{KeyedRecord, Record};
/// use rbindex::tree::{Order, RedBlackTree};
///
/// let mut tree = RedBlackTree::new();
/// for key in [10, 20, 30] {
///     tree.insert(KeyedRecord::new(key, ()))?;
/// }
///
/// assert_eq!(tree.size(), 3);
/// assert!(tree.search(&20).is_some());
/// assert!(tree.insert(KeyedRecord::new(20, ())).is_err());
///
/// let keys: Vec<i32> = tree.traverse(Order::PreOrder).map(|r| *r.key()).collect();
/// assert_eq!(keys, vec![20, 10, 30]);
/// # Ok::<(), rbindex::errors::IndexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RedBlackTree<R> {
    nodes: Vec<Node<R>>,
    root: Option<NodeId>,
    count: usize,
    stats: TreeStats,
}

impl<R> Default for RedBlackTree<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RedBlackTree<R> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        RedBlackTree {
            nodes: Vec::new(),
            root: None,
            count: 0,
            stats: TreeStats::default(),
        }
    }

    /// Creates an empty tree with room for `capacity` records before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        RedBlackTree {
            nodes: Vec::with_capacity(capacity),
            root: None,
            count: 0,
            stats: TreeStats::default(),
        }
    }

    /// Number of stored records. `O(1)`.
    #[inline]
    pub fn size(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The record at the root, if any.
    pub fn root(&self) -> Option<&R> {
        self.root.map(|id| &self.nodes[id].record)
    }

    /// Color of the root node.
    pub fn root_color(&self) -> Option<Color> {
        self.root.map(|id| self.nodes[id].color)
    }

    /// Operation counters accumulated since the tree was created.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Walks the records in the requested order.
    ///
    /// The returned iterator is lazy and borrows the tree; calling this again
    /// starts a fresh walk.
    pub fn traverse(&self, order: Order) -> Traversal<'_, R> {
        Traversal::new(&self.nodes, self.root, self.count, order)
    }

    /// In-order walk, i.e. records by ascending key.
    pub fn iter(&self) -> Traversal<'_, R> {
        self.traverse(Order::InOrder)
    }
}

impl<R: Record> RedBlackTree<R> {
    /// Looks up the record stored under `key`.
    ///
    /// Returns `None` when no record has that key. The key may be given in any
    /// borrowed form of the record key, e.g. `&str` for `String` keys.
    pub fn search<Q>(&self, key: &Q) -> Option<&R>
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).map(|id| &self.nodes[id].record)
    }

    /// Like [`search`](Self::search) but reports absence as an
    /// [`ErrorKind::NotFound`] error.
    pub fn get<Q>(&self, key: &Q) -> IndexResult<&R>
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key)
            .ok_or_else(|| IndexError::new("no record found for the given key", ErrorKind::NotFound))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).is_some()
    }

    /// Color of the node holding `key`.
    pub fn color_of_key<Q>(&self, key: &Q) -> Option<Color>
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).map(|id| self.nodes[id].color)
    }

    /// Inserts a record.
    ///
    /// Fails with [`ErrorKind::DuplicateKey`] if a record with the same key is
    /// already stored; the tree is left untouched in that case and the
    /// rejected record is dropped.
    pub fn insert(&mut self, record: R) -> IndexResult<()> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;

        while let Some(id) = cursor {
            side = match record.key().cmp(self.nodes[id].record.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    log::debug!("Rejected insert of an existing key ({} records)", self.count);
                    return Err(IndexError::new(
                        "a record with the same key already exists",
                        ErrorKind::DuplicateKey,
                    ));
                }
            };
            parent = Some(id);
            cursor = self.nodes[id].child(side);
        }

        let id = self.nodes.len();
        self.nodes.push(Node::new(record, parent));
        match parent {
            None => self.root = Some(id),
            Some(parent) => self.nodes[parent].set_child(side, Some(id)),
        }

        self.fix_after_insert(id);
        self.count += 1;
        Ok(())
    }

    fn locate<Q>(&self, key: &Q) -> Option<NodeId>
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            cursor = match key.cmp(node.record.key().borrow()) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }
}

impl<'a, R> IntoIterator for &'a RedBlackTree<R> {
    type Item = &'a R;
    type IntoIter = Traversal<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
