//! # Coloring Metrics
//!
//! Structural and coloring statistics for a graph, computed with integer
//! arithmetic only.

use crate::graph::{Graph, GraphStore};
use crate::validate::validate_coloring;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Snapshot of a graph's size and coloring state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoringMetrics {
    /// Total vertices.
    pub vertex_count: usize,
    /// Undirected edges, duplicates counted.
    pub edge_count: usize,
    /// Distinct vertex pairs joined by at least one edge.
    pub distinct_edge_count: usize,
    /// Largest vertex degree.
    pub max_degree: usize,
    /// Distinct colors currently committed.
    pub colors_used: usize,
    /// Vertices without a color.
    pub uncolored: usize,
    /// Vertices with a pre-assigned color.
    pub pinned: usize,
    /// Vertices with at least one excluded color.
    pub excluded_vertices: usize,
    /// Adjacent same-color pairs.
    pub conflicts: usize,
}

impl ColoringMetrics {
    /// Compute metrics from a graph.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let colors_used = graph
            .colors()
            .iter()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            vertex_count: graph.num_vertices(),
            edge_count: graph.edge_count(),
            distinct_edge_count: graph.edges().collect::<BTreeSet<_>>().len(),
            max_degree: graph.max_degree(),
            colors_used,
            uncolored: graph.colors().iter().filter(|c| c.is_none()).count(),
            pinned: graph.pre_assigned().len(),
            excluded_vertices: graph.excluded_vertex_count(),
            conflicts: validate_coloring(graph).len(),
        }
    }

    /// Color bound guaranteed by index-order greedy on an uncolored graph.
    #[must_use]
    pub fn greedy_bound(&self) -> usize {
        if self.vertex_count == 0 {
            0
        } else {
            self.max_degree.saturating_add(1)
        }
    }

    /// Edge density in parts per thousand (integer arithmetic only).
    ///
    /// Counts distinct pairs, so the result never exceeds 1000. Returns 0
    /// for graphs with fewer than two vertices.
    #[must_use]
    pub fn density_per_thousand(&self) -> usize {
        let n = self.vertex_count;
        if n < 2 {
            return 0;
        }
        let possible = n.saturating_mul(n - 1) / 2;
        self.distinct_edge_count.saturating_mul(1000) / possible
    }

    /// Whether the current coloring is complete and conflict-free.
    #[must_use]
    pub fn is_proper(&self) -> bool {
        self.uncolored == 0 && self.conflicts == 0
    }
}
