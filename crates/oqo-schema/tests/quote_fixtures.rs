//! Integration test: validate the sample quotes under `tests/fixtures/`
//! against `quote.schema.json`, which splits its money type into
//! `common/money.json` to exercise on-disk `$ref` resolution.

use std::path::PathBuf;

use oqo_schema::{load_json, QuoteValidator, ValidatorOptions};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn quote_validator() -> QuoteValidator {
    let schema = load_json(&fixtures().join("quote.schema.json")).unwrap();
    let options = ValidatorOptions {
        schema_root: fixtures(),
    };
    QuoteValidator::new(&schema, &options).unwrap()
}

#[test]
fn test_valid_quote_passes() {
    let quote = load_json(&fixtures().join("valid_quote.json")).unwrap();
    let report = quote_validator().validate(&quote);
    assert!(
        report.is_valid(),
        "expected no violations, got: {:?}",
        report.violations()
    );
}

#[test]
fn test_invalid_quote_reports_every_violation_sorted() {
    let quote = load_json(&fixtures().join("invalid_quote.json")).unwrap();
    let report = quote_validator().validate(&quote);

    let paths: Vec<String> = report
        .violations()
        .iter()
        .map(|v| v.path.to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "root",
            "root",
            "currency",
            "customer.name",
            "lines.0.quantity",
            "lines.1",
            "lines.1.unit_price",
            "quote_id",
        ]
    );
}

#[test]
fn test_invalid_quote_messages_name_offending_fields() {
    let quote = load_json(&fixtures().join("invalid_quote.json")).unwrap();
    let report = quote_validator().validate(&quote);

    let all = report
        .violations()
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    for needle in ["notes", "accepted_at", "quantity", "JPY"] {
        assert!(all.contains(needle), "no message mentions {needle}:\n{all}");
    }
}

#[test]
fn test_missing_sibling_schema_fails_to_compile() {
    let schema = load_json(&fixtures().join("quote.schema.json")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let options = ValidatorOptions {
        schema_root: dir.path().to_path_buf(),
    };
    assert!(QuoteValidator::new(&schema, &options).is_err());
}
