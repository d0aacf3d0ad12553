//! # Error Types
//!
//! Loading and schema errors for the validation pipeline. Schema
//! *violations* are not errors: they are the expected output of a
//! validation run and live in [`crate::ValidationReport`].

use std::path::PathBuf;

use thiserror::Error;

/// A JSON input file could not be turned into a `serde_json::Value`.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file exists but could not be read (directory, permissions, ...).
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file content is not syntactically valid JSON.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Parser error, carrying line and column.
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentError {
    /// Path of the file this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            DocumentError::Read { path, .. } | DocumentError::Parse { path, .. } => path,
        }
    }
}

/// The schema could not be turned into a working validator.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The `jsonschema` crate refused to compile the schema document.
    #[error("schema does not compile: {reason}")]
    Compile {
        /// Reason reported by the compiler.
        reason: String,
    },

    /// Draft 2020-12 evaluation is not available in this build.
    #[error("Draft 2020-12 validation is unavailable: {reason}")]
    CapabilityUnavailable {
        /// What the self-check observed.
        reason: String,
    },
}
