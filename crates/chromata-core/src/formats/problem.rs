//! Serde description of a coloring problem.
//!
//! Format-agnostic: the app layer reads it from JSON or TOML.
//!
//! ```toml
//! vertices = 4
//! edges = [[0, 1], [1, 2], [2, 3]]
//!
//! [[pre_assigned]]
//! vertex = 0
//! color = 1
//!
//! [[exclusions]]
//! vertex = 3
//! colors = [0]
//! ```

use crate::graph::GraphStore;
use crate::{ChromaError, Color, Graph, VertexId};
use serde::{Deserialize, Serialize};

/// A vertex with a fixed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    pub vertex: VertexId,
    pub color: Color,
}

/// Colors forbidden for one vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub vertex: VertexId,
    pub colors: Vec<Color>,
}

/// Graph plus constraints, as written by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSpec {
    pub vertices: usize,
    #[serde(default)]
    pub edges: Vec<(VertexId, VertexId)>,
    #[serde(default)]
    pub pre_assigned: Vec<Pin>,
    #[serde(default)]
    pub exclusions: Vec<Exclusion>,
}

impl ProblemSpec {
    /// Build the graph. Edges first, then exclusions, then pins, so that
    /// every index is validated before anything is colored.
    pub fn into_graph(self, max_vertices: usize) -> Result<Graph, ChromaError> {
        if self.vertices > max_vertices {
            return Err(ChromaError::InvalidConfig(format!(
                "{} vertices exceeds limit of {}",
                self.vertices, max_vertices
            )));
        }

        let mut graph = Graph::new(self.vertices);
        for (u, v) in self.edges {
            graph.add_edge(u, v)?;
        }
        for exclusion in self.exclusions {
            for color in exclusion.colors {
                graph.set_color_exclusion(exclusion.vertex, color)?;
            }
        }
        for pin in self.pre_assigned {
            graph.set_pre_assigned_color(pin.vertex, pin.color)?;
        }
        Ok(graph)
    }

    /// Describe an existing graph (colors are not part of a problem).
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            vertices: graph.num_vertices(),
            edges: graph.edges().collect(),
            pre_assigned: graph
                .pre_assigned()
                .into_iter()
                .map(|(vertex, color)| Pin { vertex, color })
                .collect(),
            exclusions: graph
                .vertices()
                .filter_map(|vertex| {
                    let colors: Vec<Color> = graph.exclusions(vertex).collect();
                    (!colors.is_empty()).then_some(Exclusion { vertex, colors })
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::MAX_VERTICES;

    fn problem() -> ProblemSpec {
        ProblemSpec {
            vertices: 3,
            edges: vec![(VertexId(0), VertexId(1)), (VertexId(1), VertexId(2))],
            pre_assigned: vec![Pin {
                vertex: VertexId(2),
                color: Color(4),
            }],
            exclusions: vec![Exclusion {
                vertex: VertexId(0),
                colors: vec![Color(0), Color(2)],
            }],
        }
    }

    #[test]
    fn builds_graph_with_constraints() {
        let graph = problem().into_graph(MAX_VERTICES).expect("build");

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.color(VertexId(2)), Some(Color(4)));
        assert!(graph.is_excluded(VertexId(0), Color(2)));
        assert_eq!(graph.color(VertexId(0)), None);
    }

    #[test]
    fn from_graph_describes_same_problem() {
        let original = problem();
        let graph = original.clone().into_graph(MAX_VERTICES).expect("build");
        assert_eq!(ProblemSpec::from_graph(&graph), original);
    }

    #[test]
    fn bad_edge_rejected() {
        let mut bad = problem();
        bad.edges.push((VertexId(0), VertexId(3)));
        assert!(matches!(
            bad.into_graph(MAX_VERTICES),
            Err(ChromaError::VertexOutOfRange { .. })
        ));
    }

    #[test]
    fn vertex_limit_enforced() {
        assert!(problem().into_graph(2).is_err());
    }
}
