//! # Coloring Validation
//!
//! Solvers never re-check colors that were committed before an edge was
//! added. `validate_coloring` is the explicit check for that case.

use crate::graph::GraphStore;
use crate::{Color, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Two adjacent vertices sharing a color. Always stored with `u < v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Conflict {
    pub u: VertexId,
    pub v: VertexId,
    pub color: Color,
}

/// Every adjacent same-color pair, each undirected pair reported once.
///
/// Uncolored vertices never conflict.
pub fn validate_coloring<G: GraphStore>(graph: &G) -> Vec<Conflict> {
    let mut conflicts = BTreeSet::new();
    for index in 0..graph.num_vertices() {
        let u = VertexId(index);
        let Some(color) = graph.color(u) else {
            continue;
        };
        for &v in graph.neighbors(u) {
            if u < v && graph.color(v) == Some(color) {
                conflicts.insert(Conflict { u, v, color });
            }
        }
    }
    conflicts.into_iter().collect()
}

/// Whether every vertex is colored and no edge joins two equal colors.
pub fn is_proper_coloring<G: GraphStore>(graph: &G) -> bool {
    (0..graph.num_vertices()).all(|v| graph.color(VertexId(v)).is_some())
        && validate_coloring(graph).is_empty()
}
