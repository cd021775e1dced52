//! Records stored in the index.
//!
//! A record is an immutable value with a unique, totally ordered key. The tree
//! orders, deduplicates and looks up records by that key alone, so the
//! [`Record::key`] accessor is the only comparison the engine ever performs.

mod keyed;
mod product;

pub use keyed::*;
pub use product::*;

/// A value that can be stored in a [`RedBlackTree`](crate::tree::RedBlackTree).
///
/// # Examples
///
/// ```rust
/// use rbindex::record::Record;
///
/// struct Employee {
///     badge: u32,
///     name: String,
/// }
///
/// impl Record for Employee {
///     type Key = u32;
///
///     fn key(&self) -> &u32 {
///         &self.badge
///     }
/// }
/// ```
pub trait Record {
    /// The key type; its `Ord` implementation is the order of the index.
    type Key: Ord;

    /// Returns the key this record is stored under.
    fn key(&self) -> &Self::Key;
}
