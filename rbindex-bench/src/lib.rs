//! Benchmark support for the red-black tree index.

pub mod data_gen;
