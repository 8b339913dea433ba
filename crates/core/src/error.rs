//! Error types for graph mutation, queries and persistence.

use std::path::PathBuf;

use thiserror::Error;

use crate::graph::Weight;

/// All errors reported by the graph core.
///
/// Mutation errors leave the graph exactly as it was before the call.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A query referenced a vertex that is not in the graph.
    #[error("vertex {0} not found")]
    VertexNotFound(String),

    /// The edge is already present (with the same weight, if weighted).
    #[error("edge {from} -> {to}{} already exists", weight_suffix(.weight))]
    EdgeAlreadyExists {
        from: String,
        to: String,
        weight: Option<Weight>,
    },

    /// The endpoint pair already carries an edge with another weight.
    #[error("edge {from} -> {to} already exists with a different weight")]
    EdgeWeightConflict { from: String, to: String },

    /// Nothing to remove on either endpoint.
    #[error("edge between {from} and {to} does not exist")]
    EdgeNotFound { from: String, to: String },

    /// A vertex label cannot be written to the text format.
    #[error("vertex label {0:?} is empty or contains whitespace and cannot be saved")]
    UnsavableVertex(String),

    /// The graph file could not be found.
    #[error("file {} not found", .0.display())]
    FileNotFound(PathBuf),

    /// A line of a graph file could not be understood.
    #[error("malformed graph file at line {line}: {message}")]
    Format { line: usize, message: String },

    /// Any other IO failure while reading or writing a graph file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn weight_suffix(weight: &Option<Weight>) -> String {
    match weight {
        Some(w) => format!(" with weight {w}"),
        None => String::new(),
    }
}

/// Convenience result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
