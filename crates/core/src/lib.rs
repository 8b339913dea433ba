//! Graph Manager Core Library
//!
//! This library provides a small adjacency-list graph (directed or
//! undirected, weighted or unweighted) with mutation, degree and
//! neighborhood queries, leaf pruning, and a plain text file format.

pub mod error;
pub mod export;
pub mod format;
pub mod graph;

// Re-export commonly used types
pub use error::{GraphError, Result};
pub use graph::{Graph, Neighbor, Vertex, Weight};
