//! # Snapshot Format
//!
//! Binary serialization for Chromata graphs, including their coloring and
//! constraint state. File I/O lives in the app layer.
//!
//! Format: Header (5 bytes) + postcard-serialized `SerializableGraph`.
//! - 4 bytes: Magic ("CHRM")
//! - 1 byte: Version
//!
//! Size and header are validated before the payload is deserialized.

use crate::graph::SerializableGraph;
use crate::primitives::{FORMAT_VERSION, HEADER_SIZE, MAGIC_BYTES};
use crate::{ChromaError, Graph};

/// Maximum accepted snapshot size (256 MB).
pub const MAX_SNAPSHOT_SIZE: usize = 256 * 1024 * 1024;

// =============================================================================
// FILE HEADER
// =============================================================================

/// The snapshot header precedes all graph data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistenceHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl PersistenceHeader {
    /// Create a new header with current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *MAGIC_BYTES,
            version: FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), ChromaError> {
        if &self.magic != MAGIC_BYTES {
            return Err(ChromaError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != FORMAT_VERSION {
            return Err(ChromaError::DeserializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChromaError> {
        let Some(head) = bytes.get(..HEADER_SIZE) else {
            return Err(ChromaError::DeserializationError(
                "Header too short".to_string(),
            ));
        };
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&head[0..4]);
        Ok(Self {
            magic,
            version: head[4],
        })
    }
}

impl Default for PersistenceHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a graph to bytes (header + payload).
pub fn graph_to_bytes(graph: &Graph) -> Result<Vec<u8>, ChromaError> {
    let header = PersistenceHeader::new();
    let payload = postcard::to_stdvec(&SerializableGraph::from(graph))
        .map_err(|e| ChromaError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_SIZE + payload.len());
    result.extend_from_slice(&header.to_bytes());
    result.extend_from_slice(&payload);
    Ok(result)
}

/// Deserialize a graph from bytes.
///
/// Checks, in order: minimum size, maximum size, header, payload, and
/// finally the structural consistency of the decoded graph.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<Graph, ChromaError> {
    if bytes.len() < HEADER_SIZE {
        return Err(ChromaError::DeserializationError(format!(
            "Data too short: minimum {} bytes required",
            HEADER_SIZE
        )));
    }
    if bytes.len() > MAX_SNAPSHOT_SIZE {
        return Err(ChromaError::DeserializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_SNAPSHOT_SIZE
        )));
    }

    PersistenceHeader::from_bytes(bytes)?.validate()?;

    let serializable: SerializableGraph =
        postcard::from_bytes(&bytes[HEADER_SIZE..]).map_err(|e| {
            ChromaError::DeserializationError(format!("Failed to decode graph data: {}", e))
        })?;

    Graph::try_from(serializable)
}

// =============================================================================
// TESTS
// =============================================================================
