//! # Schema Validation
//!
//! Compiles a schema document into a Draft 2020-12 validator and runs it
//! over a quote document, collecting every violation.
//!
//! ## Schema Resolution
//!
//! In-document `$ref`s (`#/$defs/...`) are resolved by the `jsonschema`
//! crate natively. References to other files go through
//! [`LocalRetriever`](crate::retrieve::LocalRetriever), rooted at
//! [`ValidatorOptions::schema_root`].
//!
//! ## Capability Check
//!
//! [`self_check`] proves at startup that Draft 2020-12 keywords are
//! actually enforced by the linked validator before any user input is
//! looked at.

use std::fmt;
use std::path::PathBuf;

use jsonschema::{Draft, ValidationOptions, Validator};
use serde_json::{json, Value};

use crate::error::SchemaError;
use crate::path::InstancePath;
use crate::report::ValidationReport;
use crate::retrieve::LocalRetriever;

/// A single schema rule failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Where in the quote document the rule failed.
    pub path: InstancePath,
    /// JSON Pointer to the failing keyword inside the schema.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.path, self.message)
    }
}

/// Knobs for building a [`QuoteValidator`].
#[derive(Debug, Clone, Default)]
pub struct ValidatorOptions {
    /// Directory relative `$ref` file references resolve against.
    /// Empty means the current directory.
    pub schema_root: PathBuf,
}

/// A compiled Draft 2020-12 validator for quote documents.
pub struct QuoteValidator {
    validator: Validator,
}

impl fmt::Debug for QuoteValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuoteValidator").finish_non_exhaustive()
    }
}

impl QuoteValidator {
    /// Compile `schema`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Compile`] if the schema is not a usable Draft 2020-12
    /// schema, including `$ref`s that cannot be retrieved locally.
    pub fn new(schema: &Value, options: &ValidatorOptions) -> Result<Self, SchemaError> {
        let validator = build_options(options)
            .build(schema)
            .map_err(|e| SchemaError::Compile {
                reason: e.to_string(),
            })?;

        if let Some(dialect) = foreign_dialect(schema) {
            tracing::warn!(
                %dialect,
                "schema declares a dialect other than Draft 2020-12; the declared dialect takes precedence"
            );
        }

        tracing::debug!(
            schema_root = %options.schema_root.display(),
            "compiled Draft 2020-12 validator"
        );
        Ok(Self { validator })
    }

    /// Validate `instance`, enumerating every violation in path order.
    pub fn validate(&self, instance: &Value) -> ValidationReport {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| {
                let violation = Violation {
                    path: InstancePath::from_pointer(&e.instance_path.to_string(), instance),
                    schema_path: e.schema_path.to_string(),
                    message: e.to_string(),
                };
                tracing::debug!(
                    path = %violation.path,
                    schema_path = %violation.schema_path,
                    "schema violation"
                );
                violation
            })
            .collect();

        tracing::debug!(violations = violations.len(), "validation finished");
        ValidationReport::new(violations)
    }
}

const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// The root `$schema`, if it names something other than Draft 2020-12.
///
/// An explicit `$schema` wins over the draft configured on the builder.
fn foreign_dialect(schema: &Value) -> Option<&str> {
    let declared = schema.get("$schema")?.as_str()?;
    (declared.trim_end_matches('#') != DRAFT_2020_12).then_some(declared)
}

fn build_options(options: &ValidatorOptions) -> ValidationOptions {
    let mut opts = jsonschema::options();
    opts.with_draft(Draft::Draft202012);
    opts.with_retriever(LocalRetriever::new(options.schema_root.clone()));
    opts
}

/// Confirm that Draft 2020-12 validation works in this build.
///
/// Compiles a small schema using `prefixItems` (new in 2020-12) and checks
/// that it accepts a conforming array and rejects a violating one.
///
/// # Errors
///
/// [`SchemaError::CapabilityUnavailable`] describing what went wrong.
pub fn self_check() -> Result<(), SchemaError> {
    let canary = json!({
        "$schema": DRAFT_2020_12,
        "type": "array",
        "prefixItems": [{ "type": "integer" }]
    });

    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&canary)
        .map_err(|e| SchemaError::CapabilityUnavailable {
            reason: e.to_string(),
        })?;

    if !validator.is_valid(&json!([1])) {
        return Err(SchemaError::CapabilityUnavailable {
            reason: "capability schema rejected a conforming instance".to_string(),
        });
    }
    if validator.is_valid(&json!(["x"])) {
        return Err(SchemaError::CapabilityUnavailable {
            reason: "prefixItems is not enforced".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSegment;

    fn validate(schema: Value, instance: Value) -> ValidationReport {
        QuoteValidator::new(&schema, &ValidatorOptions::default())
            .unwrap()
            .validate(&instance)
    }

    fn rendered_paths(report: &ValidationReport) -> Vec<String> {
        report.violations().iter().map(|v| v.path.to_string()).collect()
    }

    #[test]
    fn self_check_passes() {
        self_check().unwrap();
    }

    #[test]
    fn empty_schema_accepts_anything() {
        let report = validate(json!({}), json!({}));
        assert!(report.is_valid());
    }

    #[test]
    fn missing_required_property_reported_at_root() {
        let report = validate(
            json!({"type": "object", "required": ["a", "b"]}),
            json!({"a": 1}),
        );
        assert_eq!(report.len(), 1);
        let v = &report.violations()[0];
        assert!(v.path.is_root());
        assert!(v.message.contains("\"b\""), "{}", v.message);
        assert!(v.message.contains("required"), "{}", v.message);
    }

    #[test]
    fn array_item_violation_reported_at_index() {
        let report = validate(
            json!({"type": "array", "items": {"type": "number"}}),
            json!([1, "x"]),
        );
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations()[0].path.segments(), &[PathSegment::Index(1)]);
        assert_eq!(rendered_paths(&report), vec!["1"]);
    }

    #[test]
    fn wrong_root_type_reported_at_root() {
        let report = validate(json!({"type": "object"}), json!([1, 2]));
        assert_eq!(rendered_paths(&report), vec!["root"]);
    }

    #[test]
    fn enumerates_all_violations_in_path_order() {
        let schema = json!({
            "type": "object",
            "required": ["currency"],
            "properties": {
                "zeta": {"type": "integer"},
                "lines": {"type": "array", "items": {"type": "number"}},
                "amount": {"type": "number", "minimum": 0}
            }
        });
        let doc = json!({"zeta": "s", "lines": [1, "x", 2, "y"], "amount": -1});

        let report = validate(schema, doc);
        assert_eq!(
            rendered_paths(&report),
            vec!["root", "amount", "lines.1", "lines.3", "zeta"]
        );
    }

    #[test]
    fn nested_path_renders_dotted() {
        let schema = json!({
            "properties": {
                "a": {"items": {"properties": {"b": {"type": "string"}}}}
            }
        });
        let report = validate(schema, json!({"a": [{"b": 5}]}));
        assert_eq!(rendered_paths(&report), vec!["a.0.b"]);
    }

    #[test]
    fn additional_properties_rejected() {
        let schema = json!({
            "type": "object",
            "properties": {"id": {"type": "string"}},
            "additionalProperties": false
        });
        let report = validate(schema, json!({"id": "q-1", "extra": true}));
        assert_eq!(report.len(), 1);
        assert!(report.violations()[0].message.contains("extra"));
    }

    #[test]
    fn enum_const_and_string_constraints() {
        let schema = json!({
            "properties": {
                "status": {"enum": ["draft", "final"]},
                "version": {"const": 2},
                "code": {"type": "string", "pattern": "^[A-Z]{3}$", "maxLength": 3}
            }
        });
        let report = validate(schema, json!({"status": "void", "version": 1, "code": "usd"}));
        assert_eq!(rendered_paths(&report), vec!["code", "status", "version"]);
    }

    #[test]
    fn array_bounds_enforced() {
        let schema = json!({"type": "array", "minItems": 2, "maxItems": 3});
        assert_eq!(validate(schema.clone(), json!([1])).len(), 1);
        assert!(validate(schema, json!([1, 2])).is_valid());
    }

    #[test]
    fn combinators_enforced() {
        let schema = json!({
            "properties": {
                "all": {"allOf": [{"type": "integer"}, {"minimum": 10}]},
                "any": {"anyOf": [{"type": "string"}, {"type": "boolean"}]},
                "one": {"oneOf": [{"type": "integer"}, {"type": "number"}]},
                "not": {"not": {"type": "null"}}
            }
        });
        let report = validate(
            schema,
            json!({"all": 3, "any": 1, "one": 1, "not": null}),
        );
        assert_eq!(rendered_paths(&report), vec!["all", "any", "not", "one"]);
    }

    #[test]
    fn conditional_enforced() {
        let schema = json!({
            "if": {"properties": {"kind": {"const": "fixed"}}},
            "then": {"required": ["price"]},
            "else": {"required": ["rate"]}
        });
        assert!(validate(schema.clone(), json!({"kind": "fixed", "price": 1})).is_valid());
        assert_eq!(validate(schema.clone(), json!({"kind": "fixed"})).len(), 1);
        assert_eq!(validate(schema, json!({"kind": "floating"})).len(), 1);
    }

    #[test]
    fn local_defs_ref_resolved() {
        let schema = json!({
            "$defs": {"amount": {"type": "number", "minimum": 0}},
            "properties": {"total": {"$ref": "#/$defs/amount"}}
        });
        let report = validate(schema, json!({"total": -5}));
        assert_eq!(rendered_paths(&report), vec!["total"]);
    }

    #[test]
    fn sibling_file_ref_resolved_under_schema_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("money.json"),
            br#"{"type": "number", "minimum": 0}"#,
        )
        .unwrap();

        let schema = json!({"properties": {"total": {"$ref": "money.json"}}});
        let options = ValidatorOptions {
            schema_root: dir.path().to_path_buf(),
        };
        let validator = QuoteValidator::new(&schema, &options).unwrap();

        assert!(validator.validate(&json!({"total": 3})).is_valid());
        let report = validator.validate(&json!({"total": -3}));
        assert_eq!(rendered_paths(&report), vec!["total"]);
    }

    #[test]
    fn remote_ref_is_refused() {
        let schema = json!({"$ref": "https://example.invalid/quote.schema.json"});
        let err = QuoteValidator::new(&schema, &ValidatorOptions::default()).unwrap_err();
        assert!(matches!(err, SchemaError::Compile { .. }), "got: {err}");
    }

    #[test]
    fn invalid_schema_fails_to_compile() {
        let err = QuoteValidator::new(&json!({"type": 12}), &ValidatorOptions::default())
            .unwrap_err();
        assert!(matches!(err, SchemaError::Compile { .. }));
    }

    #[test]
    fn validation_is_deterministic() {
        let schema = json!({"items": {"type": "string"}, "minItems": 5});
        let doc = json!([1, "a", 2, true]);
        let a = validate(schema.clone(), doc.clone());
        let b = validate(schema, doc);
        assert_eq!(a, b);
    }

    #[test]
    fn violation_display() {
        let v = Violation {
            path: InstancePath::root(),
            schema_path: "/required".to_string(),
            message: r#""b" is a required property"#.to_string(),
        };
        assert_eq!(v.to_string(), r#"[root] "b" is a required property"#);
    }

    #[test]
    fn foreign_dialect_detection() {
        assert_eq!(foreign_dialect(&json!({})), None);
        assert_eq!(foreign_dialect(&json!(true)), None);
        assert_eq!(foreign_dialect(&json!({"$schema": DRAFT_2020_12})), None);
        assert_eq!(
            foreign_dialect(&json!({"$schema": "https://json-schema.org/draft/2020-12/schema#"})),
            None
        );
        assert_eq!(
            foreign_dialect(&json!({"$schema": "http://json-schema.org/draft-07/schema#"})),
            Some("http://json-schema.org/draft-07/schema#")
        );
    }

    #[test]
    fn declared_draft_07_still_compiles() {
        let schema = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object"
        });
        let validator = QuoteValidator::new(&schema, &ValidatorOptions::default()).unwrap();
        assert!(!validator.validate(&json!([])).is_valid());
    }

    #[test]
    fn parent_reference_cannot_leave_schema_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(dir.path().join("money.json"), br#"{"type": "string"}"#).unwrap();
        std::fs::write(root.join("money.json"), br#"{"type": "number"}"#).unwrap();

        let schema = json!({"properties": {"total": {"$ref": "../money.json"}}});
        let options = ValidatorOptions { schema_root: root };
        let validator = QuoteValidator::new(&schema, &options).unwrap();

        assert!(validator.validate(&json!({"total": 3})).is_valid());
        assert!(!validator.validate(&json!({"total": "3"})).is_valid());
    }
}
