//! # Primitives
//!
//! Hardcoded constants for the Chromata core.
//!
//! These are compiled into the binary and immutable at runtime.

/// Magic bytes for the Chromata snapshot header.
///
/// - File Header = Magic Bytes ("CHRM") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"CHRM";

/// Current snapshot format version.
///
/// Increment this when making breaking changes to `SerializableGraph`.
pub const FORMAT_VERSION: u8 = 1;

/// Size of the snapshot header in bytes.
pub const HEADER_SIZE: usize = 5;

/// Largest vertex count accepted from problem files.
///
/// Solver scratch memory is linear in vertices plus edges.
pub const MAX_VERTICES: usize = 100_000;

/// Heap key assigned to a vertex count, negated so that a min-heap pops the
/// largest count first.
#[must_use]
pub fn priority_key(count: usize) -> i64 {
    -(i64::try_from(count).unwrap_or(i64::MAX))
}
