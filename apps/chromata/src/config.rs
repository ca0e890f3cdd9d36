//! # Configuration
//!
//! Optional `chromata.toml` with solver defaults:
//!
//! ```toml
//! solver = "greedy"
//! greedy_exclusions = "honor"
//! max_vertices = 50000
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use chromata_core::primitives::MAX_VERTICES;
use chromata_core::{ChromaError, ExclusionPolicy, SolverKind, Strategy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "chromata.toml";

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Solver and limit settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Solver used by `color` and `enforce` when no `--solver` is given.
    pub solver: SolverKind,
    /// Whether the greedy solver honors per-vertex exclusions.
    pub greedy_exclusions: ExclusionPolicy,
    /// Largest graph accepted by `init` and `import`.
    pub max_vertices: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver: SolverKind::default(),
            greedy_exclusions: ExclusionPolicy::default(),
            max_vertices: MAX_VERTICES,
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ChromaError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ChromaError::InvalidConfig(format!("Config parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ChromaError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            ChromaError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ChromaError::InvalidConfig(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ChromaError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `chromata.toml` in the
    /// working directory is used when present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ChromaError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reject settings that can never work.
    pub fn validate(&self) -> Result<(), ChromaError> {
        if self.max_vertices > MAX_VERTICES {
            return Err(ChromaError::InvalidConfig(format!(
                "max_vertices {} exceeds hard limit {}",
                self.max_vertices, MAX_VERTICES
            )));
        }
        Ok(())
    }

    /// Solver strategy after applying command-line overrides.
    #[must_use]
    pub fn strategy(&self, solver: Option<SolverKind>, honor_exclusions: bool) -> Strategy {
        let policy = if honor_exclusions {
            ExclusionPolicy::Honor
        } else {
            self.greedy_exclusions
        };
        Strategy::new(solver.unwrap_or(self.solver), policy)
    }
}
