//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Every command loads the snapshot, applies one change or query, and
//! saves the snapshot again when the graph changed.

use super::{EdgeAction, Outcome};
use crate::config::Config;
use chromata_core::{
    ChromaError, Color, Coloring, ColoringMetrics, Conflict, ConstraintManager, Graph, GraphStore,
    ProblemSpec, Solver, SolverKind, VertexId, graph_from_bytes, graph_to_bytes, parse_dimacs,
    validate_coloring,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for problem import (100 MB).
const MAX_IMPORT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum snapshot size, matching the core decoder limit.
const MAX_SNAPSHOT_FILE_SIZE: u64 = chromata_core::formats::MAX_SNAPSHOT_SIZE as u64;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ChromaError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ChromaError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ChromaError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize an input path and make sure it names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, ChromaError> {
    let canonical = path.canonicalize().map_err(|e| {
        ChromaError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ChromaError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path against its canonical parent directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, ChromaError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        ChromaError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(ChromaError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| ChromaError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Create a snapshot with `vertices` isolated, uncolored vertices.
pub fn cmd_init(
    db_path: &Path,
    config: &Config,
    vertices: usize,
    force: bool,
) -> Result<(), ChromaError> {
    if db_path.exists() && !force {
        return Err(ChromaError::IoError(
            "Snapshot already exists. Use --force to overwrite.".to_string(),
        ));
    }
    if vertices > config.max_vertices {
        return Err(ChromaError::InvalidConfig(format!(
            "{} vertices exceeds limit of {}",
            vertices, config.max_vertices
        )));
    }

    save_graph(&Graph::new(vertices), db_path)?;
    tracing::info!(vertices, path = %db_path.display(), "initialized snapshot");
    println!("Initialized graph with {} vertices at {:?}", vertices, db_path);
    Ok(())
}

// =============================================================================
// IMPORT COMMAND
// =============================================================================

/// Problem file formats accepted by `import`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemFormat {
    Json,
    Toml,
    Dimacs,
}

impl ProblemFormat {
    /// Pick the format from an explicit name, falling back to the extension.
    pub fn resolve(explicit: Option<&str>, path: &Path) -> Result<Self, ChromaError> {
        let name = match explicit {
            Some(name) => name.to_ascii_lowercase(),
            None => path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase())
                .unwrap_or_default(),
        };

        match name.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "dimacs" | "col" => Ok(Self::Dimacs),
            other => Err(ChromaError::InvalidConfig(format!(
                "Unknown format: '{}'. Use: json, toml, dimacs",
                other
            ))),
        }
    }
}

/// Parse problem text in the given format into a graph.
pub fn parse_problem(
    text: &str,
    format: ProblemFormat,
    max_vertices: usize,
) -> Result<Graph, ChromaError> {
    match format {
        ProblemFormat::Json => {
            let spec: ProblemSpec = serde_json::from_str(text).map_err(|e| {
                ChromaError::DeserializationError(format!("Invalid JSON problem: {}", e))
            })?;
            spec.into_graph(max_vertices)
        }
        ProblemFormat::Toml => {
            let spec: ProblemSpec = toml::from_str(text).map_err(|e| {
                ChromaError::DeserializationError(format!("Invalid TOML problem: {}", e))
            })?;
            spec.into_graph(max_vertices)
        }
        ProblemFormat::Dimacs => parse_dimacs(text, max_vertices),
    }
}

/// Replace the snapshot with the graph described by a problem file.
pub fn cmd_import(
    db_path: &Path,
    config: &Config,
    json_mode: bool,
    input: &Path,
    format: Option<&str>,
) -> Result<(), ChromaError> {
    let format = ProblemFormat::resolve(format, input)?;
    tracing::info!("Importing from {:?} (format: {:?})", input, format);

    let validated_path = validate_file_path(input)?;
    validate_file_size(&validated_path, MAX_IMPORT_FILE_SIZE)?;

    let text = std::fs::read_to_string(&validated_path)
        .map_err(|e| ChromaError::IoError(format!("Read file: {}", e)))?;
    let graph = parse_problem(&text, format, config.max_vertices)?;
    save_graph(&graph, db_path)?;

    let metrics = ColoringMetrics::from_graph(&graph);
    if json_mode {
        print_json(&metrics);
    } else {
        println!(
            "Imported graph: {} vertices, {} edges, {} pinned, {} with exclusions",
            metrics.vertex_count, metrics.edge_count, metrics.pinned, metrics.excluded_vertices
        );
    }
    Ok(())
}

// =============================================================================
// MUTATION COMMANDS
// =============================================================================

#[derive(Serialize)]
struct MutationReport<'a> {
    action: &'a str,
    vertex: usize,
    other: usize,
}

fn report_mutation(json_mode: bool, action: &str, vertex: usize, other: usize, text: &str) {
    if json_mode {
        print_json(&MutationReport {
            action,
            vertex,
            other,
        });
    } else {
        println!("{}", text);
    }
}

/// Add or remove an edge.
pub fn cmd_edge(db_path: &Path, json_mode: bool, action: &EdgeAction) -> Result<(), ChromaError> {
    let mut graph = load_graph(db_path)?;

    let (name, u, v) = match *action {
        EdgeAction::Add { u, v } => {
            graph.add_edge(VertexId(u), VertexId(v))?;
            ("edge_add", u, v)
        }
        EdgeAction::Remove { u, v } => {
            graph.remove_edge(VertexId(u), VertexId(v))?;
            ("edge_remove", u, v)
        }
    };
    save_graph(&graph, db_path)?;

    let verb = if name == "edge_add" { "Added" } else { "Removed" };
    report_mutation(
        json_mode,
        name,
        u,
        v,
        &format!("{} edge {} - {}", verb, VertexId(u), VertexId(v)),
    );
    Ok(())
}

/// Pre-assign a color. The color is committed immediately.
pub fn cmd_pin(
    db_path: &Path,
    json_mode: bool,
    vertex: usize,
    color: usize,
) -> Result<(), ChromaError> {
    let mut graph = load_graph(db_path)?;
    graph.set_pre_assigned_color(VertexId(vertex), Color(color))?;
    save_graph(&graph, db_path)?;

    report_mutation(
        json_mode,
        "pin",
        vertex,
        color,
        &format!("Pinned {} to color {}", VertexId(vertex), Color(color)),
    );
    Ok(())
}

/// Forbid a color for one vertex.
pub fn cmd_exclude(
    db_path: &Path,
    json_mode: bool,
    vertex: usize,
    color: usize,
) -> Result<(), ChromaError> {
    let mut graph = load_graph(db_path)?;
    graph.set_color_exclusion(VertexId(vertex), Color(color))?;
    save_graph(&graph, db_path)?;

    report_mutation(
        json_mode,
        "exclude",
        vertex,
        color,
        &format!("Excluded color {} for {}", Color(color), VertexId(vertex)),
    );
    Ok(())
}

// =============================================================================
// COLORING COMMANDS
// =============================================================================

#[derive(Serialize)]
struct ColoringReport<'a> {
    solver: &'a str,
    coloring: &'a Coloring,
    colors_used: usize,
    uncolored: usize,
}

fn report_coloring(json_mode: bool, solver: &str, graph: &Graph) {
    let metrics = ColoringMetrics::from_graph(graph);
    let coloring = graph.coloring();

    if json_mode {
        print_json(&ColoringReport {
            solver,
            coloring: &coloring,
            colors_used: metrics.colors_used,
            uncolored: metrics.uncolored,
        });
        return;
    }

    println!("Coloring ({})", solver);
    println!("========");
    for (index, color) in coloring.iter().enumerate() {
        match color {
            Some(c) => println!("  {} = {}", VertexId(index), c),
            None => println!("  {} = -", VertexId(index)),
        }
    }
    println!();
    println!("Colors used: {}", metrics.colors_used);
    if metrics.uncolored > 0 {
        println!("Uncolored:   {}", metrics.uncolored);
    }
}

/// Run `solver` and persist whatever it committed, even on failure.
fn run_and_save<S: Solver>(
    db_path: &Path,
    json_mode: bool,
    graph: &mut Graph,
    manager: &ConstraintManager<S>,
) -> Result<(), ChromaError> {
    let result = manager.enforce_constraints(graph);
    save_graph(graph, db_path)?;

    match result {
        Ok(_) => {
            report_coloring(json_mode, manager.solver().name(), graph);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(solver = manager.solver().name(), "partial coloring saved");
            Err(e)
        }
    }
}

/// Color the graph with an explicitly chosen solver.
pub fn cmd_color(
    db_path: &Path,
    config: &Config,
    json_mode: bool,
    solver: Option<SolverKind>,
    honor_exclusions: bool,
    fresh: bool,
) -> Result<(), ChromaError> {
    let mut graph = load_graph(db_path)?;
    if fresh {
        graph.clear_colors();
    }

    let manager = ConstraintManager::with_solver(config.strategy(solver, honor_exclusions));
    run_and_save(db_path, json_mode, &mut graph, &manager)
}

/// Re-run the configured solver on the current graph.
pub fn cmd_enforce(db_path: &Path, config: &Config, json_mode: bool) -> Result<(), ChromaError> {
    let mut graph = load_graph(db_path)?;
    let manager = ConstraintManager::with_solver(config.strategy(None, false));
    run_and_save(db_path, json_mode, &mut graph, &manager)
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

#[derive(Serialize)]
struct CheckReport<'a> {
    proper: bool,
    uncolored: usize,
    conflicts: &'a [Conflict],
}

/// Report conflicting edges. Uncolored vertices are listed but never fail the check.
pub fn cmd_check(db_path: &Path, json_mode: bool) -> Result<Outcome, ChromaError> {
    let graph = load_graph(db_path)?;
    let conflicts = validate_coloring(&graph);
    let metrics = ColoringMetrics::from_graph(&graph);

    if json_mode {
        print_json(&CheckReport {
            proper: metrics.is_proper(),
            uncolored: metrics.uncolored,
            conflicts: &conflicts,
        });
    } else if conflicts.is_empty() {
        println!("No conflicts");
        if metrics.uncolored > 0 {
            println!("{} vertices are still uncolored", metrics.uncolored);
        }
    } else {
        println!("{} conflicting edges:", conflicts.len());
        for conflict in &conflicts {
            println!(
                "  {} - {} share color {}",
                conflict.u, conflict.v, conflict.color
            );
        }
    }

    if conflicts.is_empty() {
        Ok(Outcome::Success)
    } else {
        Ok(Outcome::ConflictsFound(conflicts.len()))
    }
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show graph and coloring metrics.
pub fn cmd_status(db_path: &Path, json_mode: bool) -> Result<(), ChromaError> {
    let graph = load_graph(db_path)?;
    let metrics = ColoringMetrics::from_graph(&graph);

    if json_mode {
        let output = serde_json::json!({
            "database": db_path.to_string_lossy(),
            "vertex_count": metrics.vertex_count,
            "edge_count": metrics.edge_count,
            "distinct_edge_count": metrics.distinct_edge_count,
            "max_degree": metrics.max_degree,
            "density_per_thousand": metrics.density_per_thousand(),
            "colors_used": metrics.colors_used,
            "greedy_bound": metrics.greedy_bound(),
            "uncolored": metrics.uncolored,
            "pinned": metrics.pinned,
            "excluded_vertices": metrics.excluded_vertices,
            "conflicts": metrics.conflicts,
            "proper": metrics.is_proper()
        });
        print_json(&output);
        return Ok(());
    }

    println!("Chromata Graph Status");
    println!("=====================");
    println!("Snapshot: {:?}", db_path);
    println!();
    println!("Vertices:     {}", metrics.vertex_count);
    println!("Edges:        {}", metrics.edge_count);
    println!("Max Degree:   {}", metrics.max_degree);
    println!(
        "Density:      {} per thousand",
        metrics.density_per_thousand()
    );
    println!();
    println!(
        "Colors Used:  {} (greedy bound {})",
        metrics.colors_used,
        metrics.greedy_bound()
    );
    println!("Uncolored:    {}", metrics.uncolored);
    println!("Pinned:       {}", metrics.pinned);
    println!("Excluded:     {}", metrics.excluded_vertices);
    println!("Conflicts:    {}", metrics.conflicts);

    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// JSON document written by `export`.
///
/// The problem fields sit at the top level, so the file can be fed back to
/// `import` (colors are not part of a problem and are dropped on import).
#[derive(Debug, Serialize)]
pub struct ExportDocument {
    #[serde(flatten)]
    pub problem: ProblemSpec,
    pub coloring: Coloring,
    pub metrics: ColoringMetrics,
}

impl ExportDocument {
    /// Describe the graph, its coloring and metrics.
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            problem: ProblemSpec::from_graph(graph),
            coloring: graph.coloring(),
            metrics: ColoringMetrics::from_graph(graph),
        }
    }
}

/// Write the problem, coloring and metrics as JSON.
pub fn cmd_export(db_path: &Path, output: &Path) -> Result<(), ChromaError> {
    let validated_output = validate_output_path(output)?;
    let graph = load_graph(db_path)?;

    let data = serde_json::to_vec_pretty(&ExportDocument::from_graph(&graph))
        .map_err(|e| ChromaError::SerializationError(e.to_string()))?;
    std::fs::write(&validated_output, &data)
        .map_err(|e| ChromaError::IoError(format!("Write file: {}", e)))?;

    println!("Exported {} bytes to {:?}", data.len(), validated_output);
    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Load the graph snapshot at `db_path`.
pub fn load_graph(db_path: &Path) -> Result<Graph, ChromaError> {
    if !db_path.exists() {
        return Err(ChromaError::IoError(format!(
            "No graph at {:?}. Run `chromata init` or `chromata import` first.",
            db_path
        )));
    }
    validate_file_size(db_path, MAX_SNAPSHOT_FILE_SIZE)?;

    let data = std::fs::read(db_path)
        .map_err(|e| ChromaError::IoError(format!("Read snapshot: {}", e)))?;
    graph_from_bytes(&data)
}

/// Save a graph snapshot to `db_path`.
pub fn save_graph(graph: &Graph, db_path: &Path) -> Result<(), ChromaError> {
    let data = graph_to_bytes(graph)?;
    std::fs::write(db_path, &data)
        .map_err(|e| ChromaError::IoError(format!("Write snapshot: {}", e)))?;
    tracing::debug!(bytes = data.len(), path = %db_path.display(), "snapshot saved");
    Ok(())
}
