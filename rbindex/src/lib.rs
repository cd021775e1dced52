//! # rbindex - in-memory ordered index
//!
//! A red-black tree keyed on a unique, totally ordered record key, with
//! `O(log n)` insertion and exact-key lookup.
//!
//! ## Quick Start
//!
//! ```rust
//! use rbindex::record::Product;
//! use rbindex::tree::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! tree.insert(Product::new("A-1", "Kettle", "Kitchen", "24.50"))?;
//!
//! // a second record with the same key is rejected and the first one kept
//! let err = tree.insert(Product::new("A-1", "Teapot", "Kitchen", "30.00")).unwrap_err();
//! assert!(err.is_duplicate_key());
//! assert_eq!(tree.search("A-1").map(|p| p.name()), Some("Kettle"));
//! assert!(tree.search("B-2").is_none());
//! # Ok::<(), rbindex::errors::IndexError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`tree`] - the balanced tree: insertion, lookup, traversal, diagnostics
//! - [`record`] - the `Record` trait and the bundled record types
//! - [`shared`] - a lock-protected handle for use from several threads
//! - [`catalog`] - loading product catalogs from delimited text
//! - [`errors`] - error types and result definitions

pub mod catalog;
pub mod errors;
pub mod record;
pub mod shared;
pub mod tree;
