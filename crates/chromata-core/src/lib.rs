//! # chromata-core
//!
//! The deterministic coloring engine for Chromata - THE LOGIC.
//!
//! Computes proper vertex colorings of undirected graphs while honoring
//! pre-assigned colors and per-vertex color exclusions.
//!
//! ## Components
//!
//! - `graph` - the mutable graph model and the `GraphStore` trait
//! - `solver` - DSATUR and greedy solvers
//! - `enforce` - re-run a solver after the graph changed
//! - `validate` / `metrics` - conflict detection and statistics
//! - `formats` - snapshots, DIMACS and problem descriptions
//!
//! ## Example
//!
//! ```
//! use chromata_core::{Color, ConstraintManager, Graph, GraphStore, VertexId};
//!
//! let mut graph = Graph::new(3);
//! graph.add_edge(VertexId(0), VertexId(1))?;
//! graph.add_edge(VertexId(1), VertexId(2))?;
//! graph.set_pre_assigned_color(VertexId(1), Color(2))?;
//!
//! let coloring = ConstraintManager::new().enforce_constraints(&mut graph)?;
//! assert_eq!(coloring[1], Some(Color(2)));
//! assert_ne!(coloring[0], coloring[1]);
//! # Ok::<(), chromata_core::ChromaError>(())
//! ```
//!
//! ## Constraints
//!
//! - NO async, NO network, NO file I/O
//! - BTreeMap/BTreeSet only; identical input gives identical output

// =============================================================================
// MODULES
// =============================================================================

pub mod enforce;
pub mod formats;
pub mod graph;
pub mod metrics;
pub mod primitives;
pub mod solver;
pub mod types;
pub mod validate;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{ChromaError, Color, Coloring, VertexId};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use enforce::ConstraintManager;
pub use graph::{Graph, GraphStore, SerializableGraph};
pub use metrics::ColoringMetrics;
pub use solver::{
    DsaturSolver, ExclusionPolicy, GreedySolver, Solver, SolverKind, Strategy,
};
pub use validate::{Conflict, is_proper_coloring, validate_coloring};

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use formats::{
    PersistenceHeader, ProblemSpec, graph_from_bytes, graph_to_bytes, parse_dimacs,
};
