//! # Instance Paths
//!
//! The location of a violation inside the validated document, as an
//! ordered list of property names and array indices from the root.
//!
//! The validator reports locations as JSON Pointers (RFC 6901). A pointer
//! token such as `"0"` is ambiguous on its own (array index or property
//! named `"0"`), so [`InstancePath::from_pointer`] resolves each token
//! against the instance it was reported for.
//!
//! ## Ordering
//!
//! Paths compare element-wise; a path sorts before every extension of it.
//! Indices compare numerically, keys by code point, and at the same depth
//! an index sorts before a key.

use std::fmt;

use serde_json::Value;

/// One step from a JSON value to one of its children.
///
/// Variant order matters: the derived `Ord` places `Index` before `Key`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// Position in an array.
    Index(usize),
    /// Property name in an object.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Key(k) => f.write_str(k),
        }
    }
}

/// Location of a value inside a JSON document. Empty means the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstancePath {
    segments: Vec<PathSegment>,
}

impl InstancePath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from explicit segments.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Convert a JSON Pointer into a path, resolving each token against
    /// `instance` to decide whether it addresses an array element.
    ///
    /// Tokens that cannot be resolved (the pointer runs off the instance)
    /// become [`PathSegment::Key`].
    pub fn from_pointer(pointer: &str, instance: &Value) -> Self {
        let Some(rest) = pointer.strip_prefix('/') else {
            return Self::root();
        };

        let mut current = Some(instance);
        let mut segments = Vec::new();
        for raw in rest.split('/') {
            let token = unescape_token(raw);
            let segment = match (current, token.parse::<usize>()) {
                (Some(Value::Array(items)), Ok(index)) => {
                    current = items.get(index);
                    PathSegment::Index(index)
                }
                (Some(Value::Object(map)), _) => {
                    current = map.get(&token);
                    PathSegment::Key(token)
                }
                _ => {
                    current = None;
                    PathSegment::Key(token)
                }
            };
            segments.push(segment);
        }
        Self { segments }
    }

    /// Segments from the root outwards.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True for the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Dotted rendering: `a.0.b`, or `root` for the empty path.
impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("root");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

// RFC 6901 §4: `~1` before `~0`.
fn unescape_token(raw: &str) -> String {
    if raw.contains('~') {
        raw.replace("~1", "/").replace("~0", "~")
    } else {
        raw.to_string()
    }
}
