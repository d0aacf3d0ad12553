//! # Local `$ref` Retrieval
//!
//! Resolves external `$ref` targets from the local filesystem so that
//! schemas can be split across sibling files:
//!
//! ```json
//! { "$ref": "common/money.json#/$defs/amount" }
//! ```
//!
//! A schema without `$id` has the base URI `json-schema:///`, so the
//! reference above arrives here as `json-schema:///common/money.json` and is
//! read from `<schema root>/common/money.json`. `file://` URIs are read as
//! absolute paths. Every other scheme is refused: validation never
//! performs network requests.
//!
//! ## Limitation: `..` segments
//!
//! References are resolved against `json-schema:///` before they reach the
//! retriever, and dot segments are normalised at that point. A `..` cannot
//! climb above the URI root, so `../money.json` from a schema that itself
//! lives in `<root>/sub/` arrives as `json-schema:///money.json` and is read
//! from `<root>/money.json`, never from the parent of the schema root. Use a
//! `file://` URI or `OQO_SCHEMA_ROOT` to reach files outside it.

use std::path::PathBuf;

use jsonschema::{Retrieve, Uri};
use serde_json::Value;

use crate::document::load_json;

const DEFAULT_BASE_PREFIX: &str = "json-schema:///";
const FILE_PREFIX: &str = "file://";

/// Retriever that serves `$ref` targets from disk only.
#[derive(Debug, Clone)]
pub struct LocalRetriever {
    schema_root: PathBuf,
}

impl LocalRetriever {
    /// Retriever resolving relative references under `schema_root`.
    pub fn new(schema_root: impl Into<PathBuf>) -> Self {
        Self {
            schema_root: schema_root.into(),
        }
    }

    /// Map a retrieval URI to a local file, or `None` for non-local schemes.
    pub fn local_path(&self, uri: &str) -> Option<PathBuf> {
        let without_fragment = uri.split('#').next().unwrap_or(uri);
        if let Some(relative) = without_fragment.strip_prefix(DEFAULT_BASE_PREFIX) {
            Some(self.schema_root.join(relative))
        } else {
            without_fragment.strip_prefix(FILE_PREFIX).map(PathBuf::from)
        }
    }
}

impl Retrieve for LocalRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        match self.local_path(uri_str) {
            Some(path) => {
                tracing::debug!(uri = uri_str, path = %path.display(), "resolving $ref from disk");
                Ok(load_json(&path)?)
            }
            None => {
                tracing::warn!(uri = uri_str, "refusing to retrieve remote $ref");
                Err(format!("remote reference retrieval is disabled: {uri_str}").into())
            }
        }
    }
}
