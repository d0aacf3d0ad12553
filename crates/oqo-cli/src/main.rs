//! # validate-quote entry point
//!
//! Loads environment configuration, initialises tracing on stderr, and
//! hands the raw arguments to [`oqo_cli::run`].

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use oqo_cli::config::DEFAULT_LOG_FILTER;
use oqo_cli::{run, CliConfig, EXIT_OPERATIONAL};

fn main() -> ExitCode {
    let config = CliConfig::from_env();

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(?config, "validate-quote starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(std::env::args_os().skip(1), &config, &mut out) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("failed to write report: {e:#}");
            ExitCode::from(EXIT_OPERATIONAL)
        }
    }
}
