use std::borrow::Borrow;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::IndexResult;
use crate::record::Record;
use crate::tree::{Order, RedBlackTree, TreeReport};

/// A red-black tree that can be shared between threads.
///
/// Every mutation runs under an exclusive write lock, so rotations never
/// interleave; lookups and traversals take a shared read lock and may run
/// side by side. Clones are handles to the same tree.
///
/// # Examples
///
/// ```rust
/// use rbindex::record::Product;
/// use rbindex::shared::SharedIndex;
///
/// let index = SharedIndex::new();
/// let writer = index.clone();
/// std::thread::spawn(move || {
///     writer.insert(Product::new("A-1", "Kettle", "Kitchen", "24.50"))
/// })
/// .join()
/// .unwrap()?;
///
/// assert_eq!(index.search("A-1").map(|p| p.name().to_string()), Some("Kettle".to_string()));
/// # Ok::<(), rbindex::errors::IndexError>(())
/// ```
pub struct SharedIndex<R> {
    inner: Arc<RwLock<RedBlackTree<R>>>,
}

impl<R> Clone for SharedIndex<R> {
    fn clone(&self) -> Self {
        SharedIndex {
            inner: self.inner.clone(),
        }
    }
}

impl<R> Default for SharedIndex<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SharedIndex<R> {
    pub fn new() -> Self {
        Self::from_tree(RedBlackTree::new())
    }

    /// Wraps an already built tree.
    pub fn from_tree(tree: RedBlackTree<R>) -> Self {
        SharedIndex {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    pub fn size(&self) -> usize {
        self.read(|tree| tree.size())
    }

    pub fn is_empty(&self) -> bool {
        self.read(|tree| tree.is_empty())
    }

    /// Runs `f` against the tree under the read lock.
    #[inline]
    pub fn read<T>(&self, f: impl FnOnce(&RedBlackTree<R>) -> T) -> T {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Runs `f` against the tree under the write lock.
    ///
    /// The lock is not reentrant: calling back into this handle from `f`
    /// deadlocks.
    #[inline]
    pub fn write<T>(&self, f: impl FnOnce(&mut RedBlackTree<R>) -> T) -> T {
        let mut guard = self.inner.write();
        f(&mut guard)
    }
}

impl<R: Record> SharedIndex<R> {
    /// Inserts under the write lock. See [`RedBlackTree::insert`].
    pub fn insert(&self, record: R) -> IndexResult<()> {
        self.write(|tree| tree.insert(record))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.read(|tree| tree.contains_key(key))
    }

    pub fn check_invariants(&self) -> IndexResult<TreeReport> {
        self.read(|tree| tree.check_invariants())
    }
}

impl<R: Record + Clone> SharedIndex<R> {
    /// Looks up `key` and returns a copy of the stored record.
    pub fn search<Q>(&self, key: &Q) -> Option<R>
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.read(|tree| tree.search(key).cloned())
    }

    /// Like [`search`](Self::search) but reports absence as an error.
    pub fn get<Q>(&self, key: &Q) -> IndexResult<R>
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.read(|tree| tree.get(key).cloned())
    }

    /// Copies out every record in the given order.
    pub fn snapshot(&self, order: Order) -> Vec<R> {
        self.read(|tree| tree.traverse(order).cloned().collect())
    }
}
