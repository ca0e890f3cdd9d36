//! # Graph Model
//!
//! The mutable undirected graph that solvers color in place.
//!
//! This module implements the `GraphStore` trait. Adjacency lists keep
//! insertion order (duplicates included) so that solver runs are
//! reproducible; every keyed collection is a `BTreeMap`/`BTreeSet`.

use crate::{ChromaError, Color, Coloring, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// GRAPHSTORE TRAIT
// =============================================================================

/// The GraphStore trait is the surface solvers work against.
///
/// It exposes adjacency queries, edge mutation, and the constraint state
/// (committed colors, pre-assignments, exclusions). Mutating operations
/// reject vertices outside `0..num_vertices` with `VertexOutOfRange`.
pub trait GraphStore {
    /// Number of vertices, fixed at construction.
    fn num_vertices(&self) -> usize;

    /// Neighbors of a vertex in insertion order. Empty for unknown vertices.
    fn neighbors(&self, vertex: VertexId) -> &[VertexId];

    /// Add an undirected edge. Calling twice creates a duplicate edge.
    fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), ChromaError>;

    /// Remove one occurrence of the undirected edge, if present.
    fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), ChromaError>;

    /// Committed color of a vertex, `None` if uncolored.
    fn color(&self, vertex: VertexId) -> Option<Color>;

    /// Commit a color for a vertex.
    fn commit_color(&mut self, vertex: VertexId, color: Color) -> Result<(), ChromaError>;

    /// Fix a vertex's color and commit it immediately.
    ///
    /// Exclusions are not consulted; keeping the two consistent is the
    /// caller's job.
    fn set_pre_assigned_color(&mut self, vertex: VertexId, color: Color)
    -> Result<(), ChromaError>;

    /// Forbid a color for a vertex. Never touches an already committed color.
    fn set_color_exclusion(&mut self, vertex: VertexId, color: Color) -> Result<(), ChromaError>;

    /// All pre-assignments in ascending vertex order.
    fn pre_assigned(&self) -> Vec<(VertexId, Color)>;

    /// Whether `color` is excluded for `vertex`.
    fn is_excluded(&self, vertex: VertexId, color: Color) -> bool;

    /// Snapshot of the current color assignment.
    fn coloring(&self) -> Coloring;
}

// =============================================================================
// GRAPH IMPLEMENTATION
// =============================================================================

/// The main Graph structure.
///
/// `colors` always has exactly `num_vertices` slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// Fixed vertex count.
    num_vertices: usize,

    /// Adjacency lists: vertex -> neighbors in insertion order.
    adjacency: Vec<Vec<VertexId>>,

    /// Committed colors, `None` = uncolored.
    colors: Coloring,

    /// Caller-fixed colors.
    pre_assigned: BTreeMap<VertexId, Color>,

    /// Forbidden colors per vertex. Only ever grows.
    exclusions: BTreeMap<VertexId, BTreeSet<Color>>,
}

impl Graph {
    /// Create a graph with `num_vertices` isolated, uncolored vertices.
    #[must_use]
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            adjacency: vec![Vec::new(); num_vertices],
            colors: vec![None; num_vertices],
            pre_assigned: BTreeMap::new(),
            exclusions: BTreeMap::new(),
        }
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<usize, ChromaError> {
        if vertex.index() < self.num_vertices {
            Ok(vertex.index())
        } else {
            Err(ChromaError::VertexOutOfRange {
                vertex,
                num_vertices: self.num_vertices,
            })
        }
    }

    /// All vertices in index order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        (0..self.num_vertices).map(VertexId)
    }

    /// Degree of a vertex (duplicate edges counted).
    #[must_use]
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.neighbors(vertex).len()
    }

    /// Largest degree in the graph, 0 for an empty graph.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of undirected edges, duplicates counted.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Every undirected edge once as `(low, high)`, in deterministic order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, targets)| {
            targets
                .iter()
                .filter(move |v| u < v.index())
                .map(move |v| (VertexId(u), *v))
        })
    }

    /// Committed colors, indexed by vertex.
    #[must_use]
    pub fn colors(&self) -> &[Option<Color>] {
        &self.colors
    }

    /// Pre-assigned color of a vertex, if any.
    #[must_use]
    pub fn pre_assigned_color(&self, vertex: VertexId) -> Option<Color> {
        self.pre_assigned.get(&vertex).copied()
    }

    /// Excluded colors of a vertex in ascending order.
    pub fn exclusions(&self, vertex: VertexId) -> impl Iterator<Item = Color> + '_ {
        self.exclusions
            .get(&vertex)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of vertices carrying at least one exclusion.
    #[must_use]
    pub fn excluded_vertex_count(&self) -> usize {
        self.exclusions.values().filter(|set| !set.is_empty()).count()
    }

    /// Reset every vertex to uncolored, then re-commit the pre-assignments.
    ///
    /// Lets a solver recolor the graph from scratch after mutations.
    pub fn clear_colors(&mut self) {
        self.colors.iter_mut().for_each(|slot| *slot = None);
        for (vertex, color) in &self.pre_assigned {
            self.colors[vertex.index()] = Some(*color);
        }
    }
}

impl GraphStore for Graph {
    fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        self.adjacency
            .get(vertex.index())
            .map_or(&[], Vec::as_slice)
    }

    fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), ChromaError> {
        let ui = self.check_vertex(u)?;
        let vi = self.check_vertex(v)?;
        self.adjacency[ui].push(v);
        self.adjacency[vi].push(u);
        Ok(())
    }

    fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), ChromaError> {
        let ui = self.check_vertex(u)?;
        let vi = self.check_vertex(v)?;
        if let Some(pos) = self.adjacency[ui].iter().position(|&n| n == v) {
            self.adjacency[ui].remove(pos);
        }
        if let Some(pos) = self.adjacency[vi].iter().position(|&n| n == u) {
            self.adjacency[vi].remove(pos);
        }
        Ok(())
    }

    fn color(&self, vertex: VertexId) -> Option<Color> {
        self.colors.get(vertex.index()).copied().flatten()
    }

    fn commit_color(&mut self, vertex: VertexId, color: Color) -> Result<(), ChromaError> {
        let index = self.check_vertex(vertex)?;
        self.colors[index] = Some(color);
        Ok(())
    }

    fn set_pre_assigned_color(
        &mut self,
        vertex: VertexId,
        color: Color,
    ) -> Result<(), ChromaError> {
        let index = self.check_vertex(vertex)?;
        self.pre_assigned.insert(vertex, color);
        self.colors[index] = Some(color);
        Ok(())
    }

    fn set_color_exclusion(&mut self, vertex: VertexId, color: Color) -> Result<(), ChromaError> {
        self.check_vertex(vertex)?;
        self.exclusions.entry(vertex).or_default().insert(color);
        Ok(())
    }

    fn pre_assigned(&self) -> Vec<(VertexId, Color)> {
        self.pre_assigned.iter().map(|(v, c)| (*v, *c)).collect()
    }

    fn is_excluded(&self, vertex: VertexId, color: Color) -> bool {
        self.exclusions
            .get(&vertex)
            .is_some_and(|set| set.contains(&color))
    }

    fn coloring(&self) -> Coloring {
        self.colors.clone()
    }
}

// =============================================================================
// SERIALIZATION SUPPORT
// =============================================================================

/// Serializable representation of the graph for persistence.
///
/// Adjacency lists are stored verbatim so that duplicate edges and neighbor
/// order survive a round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableGraph {
    pub num_vertices: usize,
    pub adjacency: Vec<Vec<VertexId>>,
    pub colors: Coloring,
    #[serde(default)]
    pub pre_assigned: Vec<(VertexId, Color)>,
    #[serde(default)]
    pub exclusions: Vec<(VertexId, Vec<Color>)>,
}

impl From<&Graph> for SerializableGraph {
    fn from(graph: &Graph) -> Self {
        Self {
            num_vertices: graph.num_vertices,
            adjacency: graph.adjacency.clone(),
            colors: graph.colors.clone(),
            pre_assigned: graph.pre_assigned(),
            exclusions: graph
                .exclusions
                .iter()
                .map(|(v, set)| (*v, set.iter().copied().collect()))
                .collect(),
        }
    }
}

impl TryFrom<SerializableGraph> for Graph {
    type Error = ChromaError;

    fn try_from(sg: SerializableGraph) -> Result<Self, Self::Error> {
        let n = sg.num_vertices;
        if sg.adjacency.len() != n || sg.colors.len() != n {
            return Err(ChromaError::DeserializationError(format!(
                "Expected {} adjacency lists and colors, found {} and {}",
                n,
                sg.adjacency.len(),
                sg.colors.len()
            )));
        }
        let mut graph = Graph::new(n);
        for (u, targets) in sg.adjacency.into_iter().enumerate() {
            if let Some(bad) = targets.iter().find(|v| v.index() >= n) {
                return Err(ChromaError::DeserializationError(format!(
                    "Neighbor {} of v{} out of range",
                    bad, u
                )));
            }
            graph.adjacency[u] = targets;
        }
        graph.colors = sg.colors;
        for (vertex, color) in sg.pre_assigned {
            let index = graph.check_vertex(vertex)?;
            if graph.colors[index] != Some(color) {
                return Err(ChromaError::DeserializationError(format!(
                    "Pre-assigned color {} of {} does not match committed color",
                    color, vertex
                )));
            }
            graph.pre_assigned.insert(vertex, color);
        }
        for (vertex, colors) in sg.exclusions {
            for color in colors {
                graph.set_color_exclusion(vertex, color)?;
            }
        }
        Ok(graph)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId(i)
    }

    #[test]
    fn new_graph_is_uncolored() {
        let graph = Graph::new(4);
        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.coloring(), vec![None; 4]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn add_edge_is_symmetric() {
        let mut graph = Graph::new(3);
        graph.add_edge(v(0), v(2)).expect("edge");

        assert_eq!(graph.neighbors(v(0)), &[v(2)]);
        assert_eq!(graph.neighbors(v(2)), &[v(0)]);
        assert!(graph.neighbors(v(1)).is_empty());
    }

    #[test]
    fn duplicate_edges_inflate_degree() {
        let mut graph = Graph::new(2);
        graph.add_edge(v(0), v(1)).expect("edge");
        graph.add_edge(v(0), v(1)).expect("edge");

        assert_eq!(graph.degree(v(0)), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn remove_edge_removes_one_occurrence() {
        let mut graph = Graph::new(2);
        graph.add_edge(v(0), v(1)).expect("edge");
        graph.add_edge(v(0), v(1)).expect("edge");

        graph.remove_edge(v(1), v(0)).expect("remove");
        assert_eq!(graph.neighbors(v(0)), &[v(1)]);
        assert_eq!(graph.neighbors(v(1)), &[v(0)]);

        graph.remove_edge(v(0), v(1)).expect("remove");
        assert!(graph.neighbors(v(0)).is_empty());
    }

    #[test]
    fn remove_missing_edge_is_noop() {
        let mut graph = Graph::new(3);
        graph.add_edge(v(0), v(1)).expect("edge");
        graph.remove_edge(v(0), v(2)).expect("remove");
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn out_of_range_vertex_rejected() {
        let mut graph = Graph::new(2);
        let result = graph.add_edge(v(0), v(2));
        assert!(matches!(
            result,
            Err(ChromaError::VertexOutOfRange {
                vertex: VertexId(2),
                num_vertices: 2
            })
        ));
        assert!(graph.neighbors(v(0)).is_empty());

        assert!(graph.remove_edge(v(5), v(0)).is_err());
        assert!(graph.set_pre_assigned_color(v(9), Color(0)).is_err());
        assert!(graph.set_color_exclusion(v(9), Color(0)).is_err());
    }

    #[test]
    fn pre_assignment_commits_and_overwrites() {
        let mut graph = Graph::new(2);
        graph.set_pre_assigned_color(v(1), Color(3)).expect("pin");
        assert_eq!(graph.color(v(1)), Some(Color(3)));

        graph.set_pre_assigned_color(v(1), Color(1)).expect("pin");
        assert_eq!(graph.color(v(1)), Some(Color(1)));
        assert_eq!(graph.pre_assigned(), vec![(v(1), Color(1))]);
    }

    #[test]
    fn pre_assignment_bypasses_exclusions() {
        let mut graph = Graph::new(1);
        graph.set_color_exclusion(v(0), Color(0)).expect("exclude");
        graph.set_pre_assigned_color(v(0), Color(0)).expect("pin");
        assert_eq!(graph.color(v(0)), Some(Color(0)));
    }

    #[test]
    fn exclusion_does_not_touch_committed_color() {
        let mut graph = Graph::new(1);
        graph.commit_color(v(0), Color(2)).expect("commit");
        graph.set_color_exclusion(v(0), Color(2)).expect("exclude");

        assert_eq!(graph.color(v(0)), Some(Color(2)));
        assert!(graph.is_excluded(v(0), Color(2)));
    }

    #[test]
    fn exclusions_accumulate() {
        let mut graph = Graph::new(1);
        graph.set_color_exclusion(v(0), Color(4)).expect("exclude");
        graph.set_color_exclusion(v(0), Color(1)).expect("exclude");
        graph.set_color_exclusion(v(0), Color(4)).expect("exclude");

        let excluded: Vec<_> = graph.exclusions(v(0)).collect();
        assert_eq!(excluded, vec![Color(1), Color(4)]);
        assert_eq!(graph.excluded_vertex_count(), 1);
    }

    #[test]
    fn edges_lists_each_pair_once() {
        let mut graph = Graph::new(4);
        graph.add_edge(v(2), v(0)).expect("edge");
        graph.add_edge(v(1), v(3)).expect("edge");

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(v(0), v(2)), (v(1), v(3))]);
    }

    #[test]
    fn clear_colors_keeps_pre_assignments() {
        let mut graph = Graph::new(3);
        graph.commit_color(v(0), Color(0)).expect("commit");
        graph.set_pre_assigned_color(v(2), Color(5)).expect("pin");

        graph.clear_colors();
        assert_eq!(graph.coloring(), vec![None, None, Some(Color(5))]);
    }

    #[test]
    fn serializable_roundtrip_preserves_state() {
        let mut graph = Graph::new(3);
        graph.add_edge(v(0), v(1)).expect("edge");
        graph.add_edge(v(0), v(1)).expect("edge");
        graph.add_edge(v(2), v(1)).expect("edge");
        graph.set_pre_assigned_color(v(0), Color(1)).expect("pin");
        graph.set_color_exclusion(v(2), Color(0)).expect("exclude");

        let restored = Graph::try_from(SerializableGraph::from(&graph)).expect("restore");
        assert_eq!(restored, graph);
    }

    #[test]
    fn inconsistent_serializable_rejected() {
        let sg = SerializableGraph {
            num_vertices: 2,
            adjacency: vec![vec![VertexId(5)], vec![]],
            colors: vec![None, None],
            pre_assigned: Vec::new(),
            exclusions: Vec::new(),
        };
        assert!(matches!(
            Graph::try_from(sg),
            Err(ChromaError::DeserializationError(_))
        ));
    }

    #[test]
    fn pin_color_mismatch_rejected() {
        let mut graph = Graph::new(2);
        graph.set_pre_assigned_color(v(0), Color(1)).expect("pin");
        let mut sg = SerializableGraph::from(&graph);
        sg.colors[0] = Some(Color(4));

        assert!(matches!(
            Graph::try_from(sg.clone()),
            Err(ChromaError::DeserializationError(_))
        ));

        sg.colors[0] = None;
        assert!(Graph::try_from(sg).is_err());
    }
}
