//! Loading product catalogs from delimited text.
//!
//! This sits outside the tree engine: it turns rows into [`Product`]s and
//! feeds them to [`RedBlackTree::insert`], reporting rejected rows instead of
//! stopping at them.
//!
//! [`Product`]: crate::record::Product
//! [`RedBlackTree::insert`]: crate::tree::RedBlackTree::insert

mod config;
mod loader;
mod parser;

pub use config::*;
pub use loader::*;
pub use parser::*;
