//! # Scenario Tier Tests (T0-T3)
//!
//! If ANY tier fails, the engine is INVALID.
//!
//! ## Tiers
//! - T0: Graph Model Integrity
//! - T1: Greedy Scenarios
//! - T2: DSATUR Scenarios
//! - T3: Mutation and Re-enforcement

use chromata_core::{
    ChromaError, Color, Coloring, ConstraintManager, DsaturSolver, Graph, GraphStore,
    GreedySolver, VertexId, is_proper_coloring, validate_coloring,
};

fn graph_with_edges(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::new(n);
    for &(u, v) in edges {
        graph.add_edge(VertexId(u), VertexId(v)).expect("edge");
    }
    graph
}

/// The five-vertex reference graph: two triangles sharing edge 1-2, plus a tail.
fn reference_graph() -> Graph {
    graph_with_edges(5, &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3), (3, 4)])
}

fn colors(raw: &[usize]) -> Coloring {
    raw.iter().map(|&c| Some(Color(c))).collect()
}

fn distinct(coloring: &Coloring) -> usize {
    coloring
        .iter()
        .flatten()
        .collect::<std::collections::BTreeSet<_>>()
        .len()
}

// =============================================================================
// TIER T0: GRAPH MODEL INTEGRITY
// =============================================================================

mod t0_graph_model {
    use super::*;

    /// T0.1: Adjacency stays symmetric under add and remove.
    #[test]
    fn adjacency_symmetric() {
        let mut graph = reference_graph();
        graph.remove_edge(VertexId(3), VertexId(1)).expect("remove");

        for u in graph.vertices() {
            for &v in graph.neighbors(u) {
                assert!(graph.neighbors(v).contains(&u), "{} -> {} not mirrored", u, v);
            }
        }
        assert_eq!(graph.edge_count(), 5);
    }

    /// T0.2: Every mutating call rejects out-of-range vertices.
    #[test]
    fn out_of_range_rejected() {
        let mut graph = Graph::new(3);
        let bad = VertexId(3);

        assert!(matches!(
            graph.add_edge(VertexId(0), bad),
            Err(ChromaError::VertexOutOfRange { .. })
        ));
        assert!(graph.remove_edge(bad, VertexId(0)).is_err());
        assert!(graph.set_pre_assigned_color(bad, Color(0)).is_err());
        assert!(graph.set_color_exclusion(bad, Color(0)).is_err());
        assert_eq!(graph.edge_count(), 0);
    }

    /// T0.3: Colors always have one slot per vertex.
    #[test]
    fn colors_sized_to_vertices() {
        for n in [0, 1, 7] {
            assert_eq!(Graph::new(n).coloring().len(), n);
        }
    }
}

// =============================================================================
// TIER T1: GREEDY SCENARIOS
// =============================================================================

mod t1_greedy {
    use super::*;

    /// T1.1: Triangle plus pendant colors as [0, 1, 2, 0].
    #[test]
    fn triangle_with_pendant() {
        let mut graph = graph_with_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let result = GreedySolver::new().greedy_coloring(&mut graph).expect("color");
        assert_eq!(result, colors(&[0, 1, 2, 0]));
    }

    /// T1.2: Greedy stays within max_degree + 1 colors.
    #[test]
    fn star_uses_two_colors() {
        let edges: Vec<_> = (1..10).map(|leaf| (0, leaf)).collect();
        let mut graph = graph_with_edges(10, &edges);
        let result = GreedySolver::new().greedy_coloring(&mut graph).expect("color");

        assert!(distinct(&result) <= graph.max_degree() + 1);
        assert_eq!(distinct(&result), 2);
    }

    /// T1.3: Greedy on a complete graph needs every color.
    #[test]
    fn complete_graph_uses_n_colors() {
        let mut edges = Vec::new();
        for u in 0..6 {
            for v in (u + 1)..6 {
                edges.push((u, v));
            }
        }
        let mut graph = graph_with_edges(6, &edges);
        let result = GreedySolver::new().greedy_coloring(&mut graph).expect("color");
        assert_eq!(result, colors(&[0, 1, 2, 3, 4, 5]));
    }
}

// =============================================================================
// TIER T2: DSATUR SCENARIOS
// =============================================================================

mod t2_dsatur {
    use super::*;

    /// T2.1: Reference graph colors with at most three colors.
    #[test]
    fn reference_graph_three_colors() {
        let mut graph = reference_graph();
        let result = DsaturSolver::new().dsatur(&mut graph).expect("color");

        assert!(distinct(&result) <= 3);
        assert!(is_proper_coloring(&graph));
    }

    /// T2.2: Pre-assigned colors are kept.
    #[test]
    fn pre_assigned_kept() {
        let mut graph = reference_graph();
        graph.set_pre_assigned_color(VertexId(0), Color(0)).expect("pin");
        graph.set_pre_assigned_color(VertexId(1), Color(1)).expect("pin");

        let result = DsaturSolver::new().dsatur(&mut graph).expect("color");
        assert_eq!(result[0], Some(Color(0)));
        assert_eq!(result[1], Some(Color(1)));
        assert!(validate_coloring(&graph).is_empty());
    }

    /// T2.3: Excluded colors are avoided.
    #[test]
    fn exclusion_avoided() {
        let mut graph = reference_graph();
        graph.set_color_exclusion(VertexId(1), Color(0)).expect("exclude");

        let result = DsaturSolver::new().dsatur(&mut graph).expect("color");
        assert_ne!(result[1], Some(Color(0)));
    }

    /// T2.4: Bipartite path gets two colors.
    #[test]
    fn path_two_colors() {
        let mut graph = graph_with_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let result = DsaturSolver::new().dsatur(&mut graph).expect("color");

        assert_eq!(distinct(&result), 2);
        assert!(is_proper_coloring(&graph));
    }

    /// T2.5: Empty and singleton graphs.
    #[test]
    fn trivial_graphs() {
        let mut empty = Graph::new(0);
        assert!(DsaturSolver::new().dsatur(&mut empty).expect("color").is_empty());

        let mut single = Graph::new(1);
        assert_eq!(
            DsaturSolver::new().dsatur(&mut single).expect("color"),
            colors(&[0])
        );
    }

    /// T2.6: Excluding every color surfaces NoFeasibleColor.
    #[test]
    fn exhausted_pool_is_an_error() {
        let mut graph = Graph::new(3);
        for c in 0..3 {
            graph.set_color_exclusion(VertexId(2), Color(c)).expect("exclude");
        }

        let result = DsaturSolver::new().dsatur(&mut graph);
        assert!(matches!(
            result,
            Err(ChromaError::NoFeasibleColor(VertexId(2)))
        ));
        assert_eq!(graph.color(VertexId(2)), None);
    }
}

// =============================================================================
// TIER T3: MUTATION AND RE-ENFORCEMENT
// =============================================================================

mod t3_mutation {
    use super::*;

    /// T3.1: Mutations before the first run are honored.
    #[test]
    fn dynamic_changes_before_first_run() {
        let mut graph = reference_graph();
        let manager = ConstraintManager::new();

        graph.add_edge(VertexId(4), VertexId(0)).expect("edge");
        graph.remove_edge(VertexId(0), VertexId(2)).expect("remove");

        let result = manager.enforce_constraints(&mut graph).expect("enforce");
        assert!(distinct(&result) <= 4);
        assert!(is_proper_coloring(&graph));
    }

    /// T3.2: Edge added after coloring is not repaired, only reported.
    #[test]
    fn late_edge_conflict_is_reported_not_repaired() {
        let mut graph = graph_with_edges(4, &[(0, 1), (2, 3)]);
        let manager = ConstraintManager::new();
        let first = manager.enforce_constraints(&mut graph).expect("enforce");
        assert_eq!(first[0], first[2]);

        graph.add_edge(VertexId(0), VertexId(2)).expect("edge");
        let second = manager.enforce_constraints(&mut graph).expect("enforce");

        assert_eq!(first, second);
        let conflicts = validate_coloring(&graph);
        assert_eq!(conflicts.len(), 1);
        assert_eq!((conflicts[0].u, conflicts[0].v), (VertexId(0), VertexId(2)));
    }

    /// T3.3: Clearing colors lets enforcement repair late conflicts.
    #[test]
    fn clear_and_recolor_repairs() {
        let mut graph = graph_with_edges(4, &[(0, 1), (2, 3)]);
        let manager = ConstraintManager::new();
        manager.enforce_constraints(&mut graph).expect("enforce");

        graph.add_edge(VertexId(0), VertexId(2)).expect("edge");
        graph.clear_colors();
        manager.enforce_constraints(&mut graph).expect("enforce");

        assert!(is_proper_coloring(&graph));
    }

    /// T3.4: Running twice without changes is idempotent.
    #[test]
    fn idempotent_enforcement() {
        let mut graph = reference_graph();
        graph.set_color_exclusion(VertexId(3), Color(0)).expect("exclude");
        let manager = ConstraintManager::new();

        let first = manager.enforce_constraints(&mut graph).expect("enforce");
        let second = manager.enforce_constraints(&mut graph).expect("enforce");
        assert_eq!(first, second);
    }
}
