//! # Solvers
//!
//! Coloring strategies that write into a `GraphStore` in place.
//!
//! Every solver:
//! - skips vertices that already carry a color (pre-assigned or from an
//!   earlier run), so repeated runs are idempotent
//! - returns the full coloring on success
//! - leaves whatever it committed in the graph on failure

pub mod dsatur;
pub mod greedy;

pub use dsatur::DsaturSolver;
pub use greedy::{ExclusionPolicy, GreedySolver};

use crate::graph::GraphStore;
use crate::{ChromaError, Coloring};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A coloring strategy.
pub trait Solver {
    /// Short, stable name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Color every reachable uncolored vertex of `graph`.
    fn color<G: GraphStore>(&self, graph: &mut G) -> Result<Coloring, ChromaError>;
}

// =============================================================================
// SOLVER SELECTION
// =============================================================================

/// Which solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// Saturation-ordered heuristic.
    #[default]
    Dsatur,
    /// Index-ordered greedy fallback.
    Greedy,
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverKind::Dsatur => write!(f, "dsatur"),
            SolverKind::Greedy => write!(f, "greedy"),
        }
    }
}

impl FromStr for SolverKind {
    type Err = ChromaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dsatur" => Ok(SolverKind::Dsatur),
            "greedy" => Ok(SolverKind::Greedy),
            other => Err(ChromaError::InvalidConfig(format!(
                "Unknown solver '{}' (expected dsatur or greedy)",
                other
            ))),
        }
    }
}

/// A solver picked at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Dsatur(DsaturSolver),
    Greedy(GreedySolver),
}

impl Strategy {
    /// Build the strategy for `kind`. `policy` only applies to greedy.
    #[must_use]
    pub fn new(kind: SolverKind, policy: ExclusionPolicy) -> Self {
        match kind {
            SolverKind::Dsatur => Strategy::Dsatur(DsaturSolver::new()),
            SolverKind::Greedy => Strategy::Greedy(GreedySolver::with_policy(policy)),
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Dsatur(DsaturSolver::new())
    }
}

impl Solver for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Dsatur(s) => s.name(),
            Strategy::Greedy(s) => s.name(),
        }
    }

    fn color<G: GraphStore>(&self, graph: &mut G) -> Result<Coloring, ChromaError> {
        match self {
            Strategy::Dsatur(s) => s.color(graph),
            Strategy::Greedy(s) => s.color(graph),
        }
    }
}
