//! # Greedy Solver
//!
//! Colors vertices in increasing index order with the lowest color not used
//! by an already-colored neighbor. Never uses more than `max_degree + 1`
//! colors on an uncolored graph.

use super::Solver;
use crate::graph::GraphStore;
use crate::{ChromaError, Color, Coloring, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// How the greedy solver treats per-vertex exclusions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionPolicy {
    /// Exclusions are not consulted. Historical behaviour, kept as default.
    #[default]
    Ignore,
    /// Excluded colors are skipped as if a neighbor held them.
    Honor,
}

/// Index-order greedy coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GreedySolver {
    policy: ExclusionPolicy,
}

impl GreedySolver {
    /// Greedy solver that ignores exclusions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Greedy solver with an explicit exclusion policy.
    #[must_use]
    pub fn with_policy(policy: ExclusionPolicy) -> Self {
        Self { policy }
    }

    /// The exclusion policy in effect.
    #[must_use]
    pub fn policy(&self) -> ExclusionPolicy {
        self.policy
    }

    /// Run the solver; alias for [`Solver::color`].
    pub fn greedy_coloring<G: GraphStore>(&self, graph: &mut G) -> Result<Coloring, ChromaError> {
        self.color(graph)
    }

    fn pick<G: GraphStore>(&self, graph: &G, vertex: VertexId) -> Option<Color> {
        let forbidden: BTreeSet<Color> = graph
            .neighbors(vertex)
            .iter()
            .filter_map(|&n| graph.color(n))
            .collect();

        match self.policy {
            // At most n - 1 distinct neighbors, so 0..n always has a free color.
            ExclusionPolicy::Ignore => (0..graph.num_vertices())
                .map(Color)
                .find(|c| !forbidden.contains(c)),
            ExclusionPolicy::Honor => (0..usize::MAX)
                .map(Color)
                .find(|c| !forbidden.contains(c) && !graph.is_excluded(vertex, *c)),
        }
    }
}

impl Solver for GreedySolver {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn color<G: GraphStore>(&self, graph: &mut G) -> Result<Coloring, ChromaError> {
        let n = graph.num_vertices();
        debug!(vertices = n, policy = ?self.policy, "greedy run started");

        let mut assigned = 0usize;
        for index in 0..n {
            let vertex = VertexId(index);
            if graph.color(vertex).is_some() {
                continue;
            }
            let color = self
                .pick(graph, vertex)
                .ok_or(ChromaError::NoFeasibleColor(vertex))?;
            graph.commit_color(vertex, color)?;
            assigned += 1;
        }

        debug!(assigned, "greedy run finished");
        Ok(graph.coloring())
    }
}

// =============================================================================
// TESTS
// =============================================================================
