//! # Chromata CLI Module
//!
//! This module implements the CLI interface for Chromata.
//!
//! ## Available Commands
//!
//! - `init` - Create an empty graph snapshot
//! - `import` - Build the snapshot from a JSON, TOML or DIMACS problem file
//! - `edge add|remove` - Mutate edges
//! - `pin` / `exclude` - Add coloring constraints
//! - `color` - Run a solver directly
//! - `enforce` - Re-run the configured solver after changes
//! - `check` - Report conflicting edges
//! - `status` - Show coloring metrics
//! - `export` - Write problem, coloring and metrics as JSON

mod commands;

use crate::config::Config;
use chromata_core::{ChromaError, SolverKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Chromata - constrained graph coloring
///
/// Colors the vertices of an undirected graph so that no edge joins two
/// equal colors, honoring pre-assigned colors and per-vertex exclusions.
#[derive(Parser, Debug)]
#[command(name = "chromata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the graph snapshot
    #[arg(short = 'D', long, global = true, default_value = "chromata.graph")]
    pub database: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Configuration file (defaults to ./chromata.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new graph with isolated vertices
    Init {
        /// Number of vertices
        #[arg(short = 'n', long)]
        vertices: usize,

        /// Force initialization even if the snapshot exists
        #[arg(short, long)]
        force: bool,
    },

    /// Import a problem file (vertices, edges, pins, exclusions)
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Input format (json, toml, dimacs); guessed from the extension when omitted
        #[arg(short = 't', long)]
        format: Option<String>,
    },

    /// Add or remove an edge
    Edge {
        #[command(subcommand)]
        action: EdgeAction,
    },

    /// Pre-assign a color to a vertex
    Pin {
        /// Vertex index
        vertex: usize,
        /// Color index
        color: usize,
    },

    /// Forbid a color for a vertex
    Exclude {
        /// Vertex index
        vertex: usize,
        /// Color index
        color: usize,
    },

    /// Color the graph with a solver
    Color {
        /// Solver to run (dsatur, greedy); defaults to the configured solver
        #[arg(short, long)]
        solver: Option<SolverKind>,

        /// Make the greedy solver skip excluded colors
        #[arg(long)]
        honor_exclusions: bool,

        /// Drop every non-pinned color before solving
        #[arg(long)]
        fresh: bool,
    },

    /// Re-run the configured solver on the current graph
    Enforce,

    /// Report edges whose endpoints share a color
    Check,

    /// Show graph and coloring metrics
    Status,

    /// Export problem, coloring and metrics as JSON
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Edge mutations.
#[derive(Subcommand, Debug)]
pub enum EdgeAction {
    /// Add an undirected edge
    Add { u: usize, v: usize },
    /// Remove one occurrence of an undirected edge
    Remove { u: usize, v: usize },
}

/// Result of a successful command run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command completed.
    Success,
    /// `check` found this many conflicting edges.
    ConflictsFound(usize),
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<Outcome, ChromaError> {
    let config = Config::load(cli.config.as_deref())?;
    let db_path = cli.database.as_path();
    let json_mode = cli.json_mode;

    let done = |result: Result<(), ChromaError>| result.map(|()| Outcome::Success);

    match cli.command {
        Some(Commands::Init { vertices, force }) => {
            done(cmd_init(db_path, &config, vertices, force))
        }
        Some(Commands::Import { input, format }) => done(cmd_import(
            db_path,
            &config,
            json_mode,
            &input,
            format.as_deref(),
        )),
        Some(Commands::Edge { action }) => done(cmd_edge(db_path, json_mode, &action)),
        Some(Commands::Pin { vertex, color }) => done(cmd_pin(db_path, json_mode, vertex, color)),
        Some(Commands::Exclude { vertex, color }) => {
            done(cmd_exclude(db_path, json_mode, vertex, color))
        }
        Some(Commands::Color {
            solver,
            honor_exclusions,
            fresh,
        }) => done(cmd_color(
            db_path,
            &config,
            json_mode,
            solver,
            honor_exclusions,
            fresh,
        )),
        Some(Commands::Enforce) => done(cmd_enforce(db_path, &config, json_mode)),
        Some(Commands::Check) => cmd_check(db_path, json_mode),
        Some(Commands::Status) => done(cmd_status(db_path, json_mode)),
        Some(Commands::Export { output }) => done(cmd_export(db_path, &output)),
        None => {
            // No subcommand - show status by default
            done(cmd_status(db_path, json_mode))
        }
    }
}
