//! # Constraint Enforcement
//!
//! `ConstraintManager` re-runs a solver against the current graph state
//! after edges, pre-assignments or exclusions change.
//!
//! It performs no checking of its own:
//! - colors committed by earlier runs are kept (solvers skip colored vertices)
//! - removing an edge never uncolors anything
//! - adding an edge between two equally colored vertices is not detected;
//!   use [`crate::validate::validate_coloring`] for that

use crate::graph::GraphStore;
use crate::solver::{DsaturSolver, Solver};
use crate::{ChromaError, Coloring};
use tracing::debug;

/// Restart trigger for a solver. Defaults to DSATUR.
#[derive(Debug, Clone, Default)]
pub struct ConstraintManager<S = DsaturSolver> {
    solver: S,
}

impl ConstraintManager<DsaturSolver> {
    /// Manager backed by the DSATUR solver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Solver> ConstraintManager<S> {
    /// Manager backed by an arbitrary solver.
    #[must_use]
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    /// The solver this manager runs.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Re-run the solver on the graph as it is now.
    pub fn enforce_constraints<G: GraphStore>(
        &self,
        graph: &mut G,
    ) -> Result<Coloring, ChromaError> {
        debug!(solver = self.solver.name(), "enforcing constraints");
        self.solver.color(graph)
    }
}
