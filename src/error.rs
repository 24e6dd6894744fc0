//! Error types for graph construction and search

use thiserror::Error;

use crate::types::{EdgeWeight, VertexIndex};

/// Errors that can occur during graph generation or queries
///
/// Ordinary "nothing found" outcomes (out-of-range start vertices, unreachable
/// targets, too few points to triangulate) are reported as empty results, not
/// as errors. The variants here signal broken invariants or bad configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed due to geometry issues
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// A vertex index was outside the graph
    #[error("vertex index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Offending index
        index: VertexIndex,
        /// Number of vertices
        len: usize,
    },

    /// Two parallel per-vertex arrays disagree in length
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Required length (usually the vertex count)
        expected: usize,
        /// Length that was found
        actual: usize,
    },

    /// `b` is a neighbour of `a` but not the other way around
    #[error("asymmetric edge: {b} is a neighbour of {a} but not vice versa")]
    AsymmetricEdge {
        /// Vertex holding the one-sided entry
        a: VertexIndex,
        /// Vertex missing the back entry
        b: VertexIndex,
    },

    /// An edge in the adjacency has no entry in the weight table
    #[error("no weight stored for edge ({a}, {b})")]
    MissingWeight {
        /// Lower endpoint
        a: VertexIndex,
        /// Higher endpoint
        b: VertexIndex,
    },

    /// A weight below zero was found where only non-negative weights are allowed
    #[error("negative weight {weight} on edge ({a}, {b})")]
    NegativeWeight {
        /// Lower endpoint
        a: VertexIndex,
        /// Higher endpoint
        b: VertexIndex,
        /// The offending weight
        weight: EdgeWeight,
    },
}

/// Result type alias for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GraphError::MissingWeight { a: 1, b: 4 };
        assert_eq!(err.to_string(), "no weight stored for edge (1, 4)");

        let err = GraphError::SizeMismatch { expected: 10, actual: 9 };
        assert_eq!(err.to_string(), "size mismatch: expected 10, got 9");

        let err = GraphError::InvalidConfig("bad".into());
        assert_eq!(err.to_string(), "invalid configuration: bad");
    }
}
