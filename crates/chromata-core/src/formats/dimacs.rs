//! DIMACS `.col` graph parser.
//!
//! - Lines starting with `c` are comments
//! - `p edge N M` (or `p col N M`) declares N vertices and M edges
//! - `e U V` declares an edge between 1-indexed vertices U and V
//!
//! ```text
//! c triangle
//! p edge 3 3
//! e 1 2
//! e 2 3
//! e 1 3
//! ```
//!
//! Vertices are converted to 0-indexed `VertexId`s. Edges listed in both
//! directions become duplicate edges, as `add_edge` never deduplicates.

use crate::graph::GraphStore;
use crate::{ChromaError, Graph, VertexId};
use tracing::{debug, warn};

fn parse_error(line: usize, message: impl Into<String>) -> ChromaError {
    ChromaError::ParseError {
        line,
        message: message.into(),
    }
}

fn parse_number(token: &str, line: usize, what: &str) -> Result<usize, ChromaError> {
    token.parse::<usize>().map_err(|_| {
        parse_error(
            line,
            format!("invalid {} '{}': must be a non-negative integer", what, token),
        )
    })
}

/// Parse DIMACS text into a graph with at most `max_vertices` vertices.
pub fn parse_dimacs(input: &str, max_vertices: usize) -> Result<Graph, ChromaError> {
    let mut graph: Option<Graph> = None;
    let mut declared_edges = 0usize;
    let mut parsed_edges = 0usize;

    for (index, raw) in input.lines().enumerate() {
        let line_num = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "p" => {
                if graph.is_some() {
                    return Err(parse_error(line_num, "duplicate problem line"));
                }
                if parts.len() < 4 {
                    return Err(parse_error(
                        line_num,
                        format!("expected 'p edge N M', got '{}'", line),
                    ));
                }
                if parts[1] != "edge" && parts[1] != "col" {
                    return Err(parse_error(
                        line_num,
                        format!("unsupported problem type '{}'", parts[1]),
                    ));
                }
                let n = parse_number(parts[2], line_num, "vertex count")?;
                if n > max_vertices {
                    return Err(parse_error(
                        line_num,
                        format!("{} vertices exceeds limit of {}", n, max_vertices),
                    ));
                }
                declared_edges = parse_number(parts[3], line_num, "edge count")?;
                graph = Some(Graph::new(n));
            }
            "e" => {
                let Some(g) = graph.as_mut() else {
                    return Err(parse_error(line_num, "edge before problem line"));
                };
                if parts.len() < 3 {
                    return Err(parse_error(
                        line_num,
                        format!("expected 'e U V', got '{}'", line),
                    ));
                }
                let u = parse_number(parts[1], line_num, "vertex id")?;
                let v = parse_number(parts[2], line_num, "vertex id")?;
                let n = g.num_vertices();
                for id in [u, v] {
                    if id == 0 || id > n {
                        return Err(parse_error(
                            line_num,
                            format!("vertex {} out of range [1, {}]", id, n),
                        ));
                    }
                }
                g.add_edge(VertexId(u - 1), VertexId(v - 1))?;
                parsed_edges += 1;
            }
            other => {
                debug!(line = line_num, kind = other, "ignoring unknown DIMACS line");
            }
        }
    }

    let graph = graph.ok_or_else(|| parse_error(0, "missing problem line"))?;
    if parsed_edges != declared_edges {
        warn!(
            declared = declared_edges,
            parsed = parsed_edges,
            "DIMACS edge count mismatch"
        );
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::MAX_VERTICES;

    #[test]
    fn parses_triangle() {
        let input = "c triangle\np edge 3 3\ne 1 2\ne 2 3\ne 1 3\n";
        let graph = parse_dimacs(input, MAX_VERTICES).expect("parse");

        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.neighbors(VertexId(0)), &[VertexId(1), VertexId(2)]);
    }

    #[test]
    fn accepts_col_problem_type_and_blank_lines() {
        let input = "\np col 2 1\n\ne 2 1\n";
        let graph = parse_dimacs(input, MAX_VERTICES).expect("parse");
        assert_eq!(graph.neighbors(VertexId(1)), &[VertexId(0)]);
    }

    #[test]
    fn edge_before_problem_line_rejected() {
        let result = parse_dimacs("e 1 2\np edge 2 1\n", MAX_VERTICES);
        assert!(matches!(result, Err(ChromaError::ParseError { line: 1, .. })));
    }

    #[test]
    fn out_of_range_vertex_rejected() {
        let result = parse_dimacs("p edge 2 1\ne 0 1\n", MAX_VERTICES);
        assert!(matches!(result, Err(ChromaError::ParseError { line: 2, .. })));

        let result = parse_dimacs("p edge 2 1\ne 1 3\n", MAX_VERTICES);
        assert!(result.is_err());
    }

    #[test]
    fn malformed_lines_rejected() {
        assert!(parse_dimacs("p edge x 1\n", MAX_VERTICES).is_err());
        assert!(parse_dimacs("p edge 3\n", MAX_VERTICES).is_err());
        assert!(parse_dimacs("p cnf 3 1\n", MAX_VERTICES).is_err());
        assert!(parse_dimacs("p edge 3 1\ne 1\n", MAX_VERTICES).is_err());
        assert!(parse_dimacs("c only comments\n", MAX_VERTICES).is_err());
    }

    #[test]
    fn vertex_limit_enforced() {
        let result = parse_dimacs("p edge 11 0\n", 10);
        assert!(matches!(result, Err(ChromaError::ParseError { .. })));
    }
}
