//! # Validate Command
//!
//! The whole of `validate-quote`: check the capability, parse the two
//! positional paths, load both documents, validate, and print the report.
//!
//! ## Output Contract
//!
//! Everything the user sees goes to the writer passed in (stdout in the
//! binary). Scripts parse this output, so message text and exit codes are
//! fixed:
//!
//! | Outcome                               | Exit |
//! |---------------------------------------|------|
//! | quote valid                           | 0    |
//! | violations, usage, missing file(s)    | 1    |
//! | Draft 2020-12 support unavailable     | 1    |
//! | unreadable/malformed JSON, bad schema | 2    |
//! | bad `OQO_SCHEMA_ROOT`                 | 2    |
//!
//! Usage and missing-file checks run before configuration is validated,
//! so a bad environment never masks a wrong invocation.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde_json::Value;

use oqo_schema::{load_json, DocumentError, QuoteValidator, SchemaError, ValidatorOptions};

use crate::config::CliConfig;

/// The quote satisfies the schema.
pub const EXIT_VALID: u8 = 0;
/// Violations found, or the invocation itself was wrong.
pub const EXIT_INVALID: u8 = 1;
/// An input could not be read, parsed, or compiled.
pub const EXIT_OPERATIONAL: u8 = 2;

/// Printed for any argument count other than two.
pub const USAGE: &str = "\
validate-quote - Validate a quote JSON file against the OQO schema.

Usage:
    validate-quote <quote.json> <schema.json>

Exits 0 when the quote is valid, 1 when it is not (or on usage errors),
and 2 when an input cannot be read or parsed.";

/// Printed when the startup self-check fails.
pub const MISSING_CAPABILITY_MESSAGE: &str = "Error: Draft 2020-12 support from the 'jsonschema' crate is required. Reinstall via 'cargo install --path crates/oqo-cli'.";

/// Positional arguments of `validate-quote`.
///
/// Help and version flags are disabled and hyphenated values accepted:
/// both arguments are always file paths.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "validate-quote",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct ValidateArgs {
    /// Path to the quote document.
    #[arg(value_name = "QUOTE", allow_hyphen_values = true)]
    pub quote: PathBuf,

    /// Path to the JSON Schema document.
    #[arg(value_name = "SCHEMA", allow_hyphen_values = true)]
    pub schema: PathBuf,
}

/// Parse the arguments after the program name. `None` means usage error.
pub fn parse_args<I, T>(args: I) -> Option<ValidateArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() != 2 {
        return None;
    }
    let argv = std::iter::once(OsString::from("validate-quote")).chain(args);
    ValidateArgs::try_parse_from(argv).ok()
}

/// Run `validate-quote` with the arguments after the program name.
///
/// Returns the process exit code. `Err` only for failures writing to `out`.
pub fn run<I, T, W>(args: I, config: &CliConfig, out: &mut W) -> Result<u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    W: Write,
{
    if let Err(e) = oqo_schema::self_check() {
        tracing::error!(error = %e, "validation capability self-check failed");
        writeln!(out, "{MISSING_CAPABILITY_MESSAGE}")?;
        return Ok(EXIT_INVALID);
    }

    let Some(args) = parse_args(args) else {
        writeln!(out, "{USAGE}")?;
        return Ok(EXIT_INVALID);
    };

    run_validate(&args, config, out)
}

/// Validate `args.quote` against `args.schema` and print the report.
pub fn run_validate<W: Write>(args: &ValidateArgs, config: &CliConfig, out: &mut W) -> Result<u8> {
    if !args.quote.exists() || !args.schema.exists() {
        writeln!(
            out,
            "Error: File(s) not found: {}, {}",
            args.quote.display(),
            args.schema.display()
        )?;
        return Ok(EXIT_INVALID);
    }

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "configuration rejected");
        writeln!(out, "Error: {e}")?;
        return Ok(EXIT_OPERATIONAL);
    }

    let (quote, schema) = match load_inputs(args) {
        Ok(docs) => docs,
        Err(e) => {
            tracing::debug!(path = %e.path().display(), "input failed to load");
            writeln!(out, "Error: {e}")?;
            return Ok(EXIT_OPERATIONAL);
        }
    };

    let options = ValidatorOptions {
        schema_root: config.schema_root_for(&args.schema),
    };
    let validator = match QuoteValidator::new(&schema, &options) {
        Ok(v) => v,
        Err(SchemaError::Compile { reason }) => {
            writeln!(
                out,
                "Error: invalid schema in {}: {reason}",
                args.schema.display()
            )?;
            return Ok(EXIT_OPERATIONAL);
        }
        Err(other) => {
            writeln!(out, "Error: {other}")?;
            return Ok(EXIT_OPERATIONAL);
        }
    };

    let report = validator.validate(&quote);
    tracing::info!(
        quote = %args.quote.display(),
        schema = %args.schema.display(),
        violations = report.len(),
        "validated quote"
    );

    report.render(out)?;
    Ok(if report.is_valid() {
        EXIT_VALID
    } else {
        EXIT_INVALID
    })
}

fn load_inputs(args: &ValidateArgs) -> Result<(Value, Value), DocumentError> {
    let quote = load_json(&args.quote)?;
    let schema = load_json(&args.schema)?;
    Ok((quote, schema))
}
