//! JSON document loading.

use std::path::Path;

use serde_json::Value;

use crate::error::DocumentError;

/// Read `path` and parse it as JSON.
///
/// The file is read in full and closed before parsing begins, so the
/// handle is released on every exit path.
///
/// # Errors
///
/// [`DocumentError::Read`] if the file cannot be read,
/// [`DocumentError::Parse`] if its content is not valid JSON.
pub fn load_json(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value = serde_json::from_str(&content).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded JSON document");
    Ok(value)
}
