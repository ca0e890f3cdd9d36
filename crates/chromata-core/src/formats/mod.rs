//! # Formats
//!
//! Pure byte/text transformations for graphs. No file I/O.
//!
//! - `persistence`: binary snapshots (graph + coloring + constraints)
//! - `dimacs`: DIMACS `.col` benchmark graphs
//! - `problem`: serde problem description for JSON/TOML input

pub mod dimacs;
pub mod persistence;
pub mod problem;

pub use dimacs::parse_dimacs;
pub use persistence::{MAX_SNAPSHOT_SIZE, PersistenceHeader, graph_from_bytes, graph_to_bytes};
pub use problem::{Exclusion, Pin, ProblemSpec};
