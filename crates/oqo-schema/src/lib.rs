//! # oqo-schema - Quote Schema Validation
//!
//! Validates quote documents against JSON Schema (Draft 2020-12) and
//! produces a deterministic, human-readable violation report.
//!
//! ## Pipeline
//!
//! - [`document::load_json`]: reads and parses a JSON file.
//! - [`QuoteValidator`]: compiles the schema and collects every
//!   violation (full enumeration, never fail-fast).
//! - [`InstancePath`]: structured location of a violation, ordered
//!   segment-by-segment so reports are stable across runs.
//! - [`ValidationReport::render`]: writes the success line or the
//!   numbered error listing.
//!
//! ## Crate Policy
//!
//! - Schema evaluation is delegated to the `jsonschema` crate; this crate
//!   never reimplements keyword semantics.
//! - `$ref` retrieval is local-only. Remote URIs are refused so that a
//!   validation run never touches the network.
//! - Output format is part of the contract: automation parses it.

pub mod document;
pub mod error;
pub mod path;
pub mod report;
pub mod retrieve;
pub mod validate;

pub use document::load_json;
pub use error::{DocumentError, SchemaError};
pub use path::{InstancePath, PathSegment};
pub use report::{ValidationReport, SUCCESS_MESSAGE};
pub use validate::{self_check, QuoteValidator, ValidatorOptions, Violation};
