//! Envwarp: container entrypoint that prepares an environment before
//! handing control to the real workload.
//!
//! This is the main entry point for the `envwarp` CLI. It parses arguments,
//! dispatches to the pipeline or the health probe, and handles errors with
//! proper exit codes.

mod cli;
mod commands;
pub mod env;
pub mod error;
pub mod exit_codes;
pub mod launcher;
pub mod probe;
pub mod secrets;
pub mod template;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.into_mode()) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
