//! Command-line interface orchestration for trellis.
//!
//! The CLI loads one or more tab-delimited edge lists, runs the community
//! optimizer, and streams the encoded hierarchy records to stdout.

mod commands;

pub use commands::{Cli, CliError, ModelArg, run_cli};

#[cfg(test)]
mod tests;
