//! CLI configuration.
//!
//! The command line is fixed at exactly two positional paths, so every
//! tunable lives in the environment.

use std::path::{Path, PathBuf};

/// Log filter used when neither `OQO_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Runtime configuration for `validate-quote`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// `tracing` filter directive for diagnostics on stderr.
    pub log_filter: String,
    /// Directory relative `$ref`s resolve against. `None` means the
    /// schema file's own directory.
    pub schema_root: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            schema_root: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `OQO_LOG` (default: `RUST_LOG`, then `warn`)
    /// - `OQO_SCHEMA_ROOT` (default: directory of the schema file)
    ///
    /// Loading never fails; [`CliConfig::validate`] reports bad values once
    /// the invocation itself has been checked.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_filter = lookup("OQO_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let schema_root = lookup("OQO_SCHEMA_ROOT")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            log_filter,
            schema_root,
        }
    }

    /// Check values that only matter once validation is about to run.
    ///
    /// # Errors
    ///
    /// [`ConfigError::SchemaRootNotDir`] if `OQO_SCHEMA_ROOT` names
    /// something other than a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.schema_root {
            Some(dir) if !dir.is_dir() => Err(ConfigError::SchemaRootNotDir(dir.clone())),
            _ => Ok(()),
        }
    }

    /// Root for relative `$ref` resolution when validating against
    /// `schema_path`.
    pub fn schema_root_for(&self, schema_path: &Path) -> PathBuf {
        match &self.schema_root {
            Some(root) => root.clone(),
            None => schema_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OQO_SCHEMA_ROOT is not a directory: {}", .0.display())]
    SchemaRootNotDir(PathBuf),
}
