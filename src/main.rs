//! rust_outliers CLI - remove trailing z-score outliers from a CSV column

use clap::Parser;
use rust_outliers::cli::{Cli, output};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let mut stdout = std::io::stdout().lock();
    match cli.execute(&mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}
