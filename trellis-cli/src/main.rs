//! CLI entry point for the trellis pipeline.
//!
//! Parses command-line arguments with clap, runs community detection and
//! hierarchy encoding, streams the records to stdout, and maps errors to
//! per-class exit codes. Logging is initialized eagerly so subsequent
//! operations can emit structured diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, field};

use trellis_cli::{
    cli::{Cli, CliError, run_cli},
    logging::{self, LoggingError},
};
use trellis_core::render_records;

/// Parse CLI arguments, execute the pipeline, render the record stream,
/// and flush it.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let edges = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_records(&edges, &mut writer).context("failed to render records")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (exit, code) = err.downcast_ref::<CliError>().map_or_else(
            || (ExitCode::FAILURE, None),
            |cli_error| (ExitCode::from(cli_error.exit_code()), Some(cli_error.code())),
        );
        error!(
            error = %err,
            code = code.map(field::display),
            "command execution failed"
        );
        return exit;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
