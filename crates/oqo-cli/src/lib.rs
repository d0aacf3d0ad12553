//! # oqo-cli - `validate-quote`
//!
//! Command-line front end for [`oqo_schema`]: validates a quote JSON
//! document against a Draft 2020-12 JSON Schema.
//!
//! ```bash
//! validate-quote quote.json quote.schema.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument handling and output live here; validation lives in
//!   `oqo-schema`.
//! - Output text and exit codes are a compatibility surface for CI
//!   scripts and must not drift.
//! - Diagnostics go through `tracing` to stderr; stdout carries only the
//!   report.

pub mod config;
pub mod validate;

pub use config::{CliConfig, ConfigError};
pub use validate::{run, run_validate, ValidateArgs, EXIT_INVALID, EXIT_OPERATIONAL, EXIT_VALID};
