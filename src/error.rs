//! Error types for sliver.
//!
//! All fallible mesh operations return [`Result`]. A failed modifier never
//! hands back a partially rewired mesh: the caller's input is untouched and
//! the error describes why the operation was abandoned.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has duplicate vertex indices.
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// An operation was given a mesh of the wrong face kind
    /// (e.g. a quad mesh passed to a triangles-only modifier).
    #[error("operation requires a pure {expected} mesh")]
    WrongFaceKind {
        /// Human-readable name of the required face kind.
        expected: &'static str,
    },

    /// The mesh topology does not admit the requested operation.
    #[error("invalid mesh topology: {details}")]
    InvalidTopology {
        /// Description of the offending topology.
        details: String,
    },

    /// An internal iteration or retry budget was exhausted. A result that
    /// has not converged has no defined interpretation, so this is a hard
    /// failure rather than a partial result.
    #[error("{what} exceeded its budget of {limit} iterations")]
    BudgetExhausted {
        /// What ran out of budget.
        what: &'static str,
        /// The budget that was exceeded.
        limit: usize,
    },

    /// An operation that needs a seed or selection found none.
    #[error("no selection: {0}")]
    NoSelection(&'static str),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an [`MeshError::InvalidTopology`] from anything printable.
    pub fn topology(details: impl Into<String>) -> Self {
        MeshError::InvalidTopology {
            details: details.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
