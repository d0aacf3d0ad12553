//! # Validation Report
//!
//! The sorted outcome of one validation run and its textual rendering.
//! The rendered text is consumed by automation, so its exact shape is
//! fixed:
//!
//! ```text
//! ❌ Quote is invalid. Found 2 error(s):
//!  1. [root] "b" is a required property
//!  2. [lines.1] "x" is not of type "number"
//! ```

use std::io::{self, Write};

use crate::validate::Violation;

/// Printed when the document satisfies the schema.
pub const SUCCESS_MESSAGE: &str = "✅ Quote is valid according to the schema.";

/// All violations from one run, ordered by instance path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Build a report, sorting by path. The sort is stable: violations at
    /// the same path keep the order the validator emitted them in.
    pub fn new(mut violations: Vec<Violation>) -> Self {
        violations.sort_by(|a, b| a.path.cmp(&b.path));
        Self { violations }
    }

    /// True when nothing failed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations in path order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Write the success line, or the header and one numbered line per
    /// violation.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.violations.is_empty() {
            return writeln!(out, "{SUCCESS_MESSAGE}");
        }

        writeln!(
            out,
            "❌ Quote is invalid. Found {} error(s):",
            self.violations.len()
        )?;
        for (idx, violation) in self.violations.iter().enumerate() {
            writeln!(out, " {}. {violation}", idx + 1)?;
        }
        Ok(())
    }
}
