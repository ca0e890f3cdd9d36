//! # chromata
//!
//! Command-line front end for the chromata-core coloring engine.
//!
//! The binary keeps one graph in a snapshot file and applies each command
//! to it: build or import a graph, mutate edges and constraints, color it,
//! check it, and export the result.

pub mod cli;
pub mod config;
