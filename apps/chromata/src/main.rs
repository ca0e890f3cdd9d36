//! # Chromata
//!
//! The main binary for the Chromata constrained graph coloring engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            apps/chromata (THE BINARY)        │
//! │                                              │
//! │  ┌─────────────┐        ┌────────────────┐   │
//! │  │    CLI      │        │ Snapshot file  │   │
//! │  │   (clap)    │◄──────►│  (postcard)    │   │
//! │  └──────┬──────┘        └────────────────┘   │
//! │         ▼                                    │
//! │  ┌───────────────┐                           │
//! │  │ chromata-core │                           │
//! │  │  (THE LOGIC)  │                           │
//! │  └───────────────┘                           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! chromata init --vertices 5
//! chromata edge add 0 1
//! chromata pin 0 2
//! chromata color --solver dsatur
//! chromata check
//! chromata import -i problem.toml
//! ```

use chromata::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // CHROMATA_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("CHROMATA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let cli = cli::Cli::parse();

    let default_filter = if cli.verbose {
        "chromata=debug,chromata_core=debug"
    } else {
        "chromata=info,chromata_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    match cli::execute(cli) {
        Ok(cli::Outcome::Success) => {}
        Ok(cli::Outcome::ConflictsFound(count)) => {
            tracing::warn!(conflicts = count, "coloring is not proper");
            std::process::exit(2);
        }
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the Chromata startup banner.
fn print_banner() {
    println!(
        r#"
   ___ _                              _
  / __| |_  _ _ ___ _ __  __ _ _ __ _| |_ __ _
 | (__| ' \| '_/ _ \ '  \/ _` |  _/ _` |  _/ _` |
  \___|_||_|_| \___/_|_|_\__,_|\__\__,_|\__\__,_|

  Constrained Graph Coloring v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
