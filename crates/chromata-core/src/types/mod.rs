//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the coloring engine:
//! - Vertex and color identifiers (`VertexId`, `Color`)
//! - The coloring result (`Coloring`)
//! - Error types (`ChromaError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Index of a vertex in a graph.
///
/// Vertices of a graph with `n` vertices are exactly `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub usize);

impl VertexId {
    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for VertexId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// A color index.
///
/// Colors are non-negative by construction; the lowest color is `Color(0)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Color(pub usize);

impl Color {
    /// Get the raw color index.
    #[must_use]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Color {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

// =============================================================================
// COLORING
// =============================================================================

/// A color assignment indexed by vertex.
///
/// `None` is the "uncolored" sentinel: the vertex has not been reached by
/// any solver (or a solver stopped before reaching it).
pub type Coloring = Vec<Option<Color>>;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Chromata system.
///
/// - No silent failures
/// - Use `Result<T, ChromaError>` for fallible operations
/// - The core never panics; every error leaves the graph in an inspectable state
#[derive(Debug, Error)]
pub enum ChromaError {
    /// A vertex argument is outside `0..num_vertices`.
    #[error("Vertex {vertex} out of range for graph with {num_vertices} vertices")]
    VertexOutOfRange {
        vertex: VertexId,
        num_vertices: usize,
    },

    /// DSATUR reached a vertex whose available-color set is empty.
    ///
    /// The colors committed before the failure remain in the graph.
    #[error("No feasible color left for vertex {0}")]
    NoFeasibleColor(VertexId),

    /// A problem file could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// A configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
