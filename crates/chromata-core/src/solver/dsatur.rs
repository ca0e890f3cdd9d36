//! # DSATUR Solver
//!
//! Colors the most constrained uncolored vertex next.
//!
//! ## Queue discipline
//!
//! The queue is a min-heap of `(key, vertex)`:
//! - it is seeded with `priority_key(degree)` for every uncolored vertex
//! - each time a neighbor is colored, the vertex is pushed again with
//!   `priority_key(saturation)`
//!
//! Both kinds of key live in the same heap and are compared as plain
//! integers. Older entries are never removed; a popped vertex that is
//! already colored is skipped.
//!
//! ## Saturation
//!
//! `saturation[v]` counts neighbor-colored events during the run, not the
//! number of distinct neighbor colors.
//!
//! ## Available colors
//!
//! A vertex may take any color in `0..n` that is neither excluded for it nor
//! held by a colored neighbor. Colors held by neighbors are tracked per vertex
//! as a `blocked` set, seeded from every color already in the graph (pins and
//! colors left by earlier runs) and grown as the run commits colors, so
//! scratch memory grows with the edge count rather than with `n` squared.
//!
//! ## Color choice
//!
//! Among the vertex's available colors, the one minimising
//! `(neighbors currently holding it, color index)` wins.

use super::Solver;
use crate::graph::GraphStore;
use crate::primitives::priority_key;
use crate::{ChromaError, Color, Coloring, VertexId};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};
use tracing::{debug, trace, warn};

/// Saturation-degree ordered coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DsaturSolver;

/// Scratch state for one run. Dropped when the run returns.
struct Run {
    saturation: Vec<usize>,
    blocked: Vec<BTreeSet<Color>>,
    queue: BinaryHeap<Reverse<(i64, VertexId)>>,
}

impl DsaturSolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run the solver; alias for [`Solver::color`].
    pub fn dsatur<G: GraphStore>(&self, graph: &mut G) -> Result<Coloring, ChromaError> {
        self.color(graph)
    }

    fn prepare<G: GraphStore>(graph: &G) -> Run {
        let n = graph.num_vertices();

        let mut blocked = vec![BTreeSet::new(); n];
        for vertex in (0..n).map(VertexId) {
            let Some(color) = graph.color(vertex) else {
                continue;
            };
            for neighbor in graph.neighbors(vertex) {
                if let Some(set) = blocked.get_mut(neighbor.index()) {
                    set.insert(color);
                }
            }
        }

        let queue = (0..n)
            .map(VertexId)
            .filter(|&v| graph.color(v).is_none())
            .map(|v| Reverse((priority_key(graph.neighbors(v).len()), v)))
            .collect();

        Run {
            saturation: vec![0; n],
            blocked,
            queue,
        }
    }

    /// Lowest `(neighbors holding it, color)` among the colors in `0..n`
    /// that are neither blocked nor excluded for `vertex`.
    fn choose_color<G: GraphStore>(
        graph: &G,
        vertex: VertexId,
        blocked: &BTreeSet<Color>,
    ) -> Option<Color> {
        let mut held: BTreeMap<Color, usize> = BTreeMap::new();
        for &neighbor in graph.neighbors(vertex) {
            if let Some(color) = graph.color(neighbor) {
                *held.entry(color).or_default() += 1;
            }
        }

        let mut best: Option<(usize, Color)> = None;
        for color in (0..graph.num_vertices()).map(Color) {
            if blocked.contains(&color) || graph.is_excluded(vertex, color) {
                continue;
            }
            let key = (held.get(&color).copied().unwrap_or(0), color);
            if best.is_none_or(|current| key < current) {
                best = Some(key);
            }
            // Later colors cannot beat a zero count.
            if key.0 == 0 {
                break;
            }
        }
        best.map(|(_, color)| color)
    }

    /// Commit `color` to `vertex` and block it for every neighbor.
    fn assign<G: GraphStore>(
        graph: &mut G,
        run: &mut Run,
        vertex: VertexId,
        color: Color,
    ) -> Result<(), ChromaError> {
        graph.commit_color(vertex, color)?;
        for neighbor in graph.neighbors(vertex) {
            if let Some(set) = run.blocked.get_mut(neighbor.index()) {
                set.insert(color);
            }
        }
        Ok(())
    }
}

impl Solver for DsaturSolver {
    fn name(&self) -> &'static str {
        "dsatur"
    }

    fn color<G: GraphStore>(&self, graph: &mut G) -> Result<Coloring, ChromaError> {
        let mut run = Self::prepare(graph);
        debug!(
            vertices = graph.num_vertices(),
            queued = run.queue.len(),
            "dsatur run started"
        );

        for (vertex, color) in graph.pre_assigned() {
            Self::assign(graph, &mut run, vertex, color)?;
        }

        let mut assigned = 0usize;
        while let Some(Reverse((key, vertex))) = run.queue.pop() {
            if graph.color(vertex).is_some() {
                trace!(%vertex, key, "skipping stale queue entry");
                continue;
            }

            let empty = BTreeSet::new();
            let blocked = run.blocked.get(vertex.index()).unwrap_or(&empty);
            let Some(color) = Self::choose_color(graph, vertex, blocked) else {
                warn!(%vertex, assigned, "no feasible color left");
                return Err(ChromaError::NoFeasibleColor(vertex));
            };

            Self::assign(graph, &mut run, vertex, color)?;
            assigned += 1;

            for &neighbor in graph.neighbors(vertex) {
                if graph.color(neighbor).is_none() {
                    let count = &mut run.saturation[neighbor.index()];
                    *count += 1;
                    run.queue.push(Reverse((priority_key(*count), neighbor)));
                }
            }
        }

        debug!(assigned, "dsatur run finished");
        Ok(graph.coloring())
    }
}

// =============================================================================
// TESTS
// =============================================================================
