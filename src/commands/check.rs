//! The `check` subcommand: probe an endpoint for an orchestrator
//! liveness/readiness check.

use crate::cli::CheckArgs;
use crate::error::{EnvwarpError, Result};
use crate::probe;

/// Fallback variable supplying the probe address.
pub const CHECKURL_VAR: &str = "ENVWARP_CHECKURL";

/// Probe the configured address; health maps to the process exit status.
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let address = match args.address.filter(|addr| !addr.is_empty()) {
        Some(addr) => addr,
        None => std::env::var(CHECKURL_VAR).unwrap_or_default(),
    };
    if address.is_empty() {
        return Err(EnvwarpError::Config(format!(
            "address must be provided as an argument or via the {} environment variable",
            CHECKURL_VAR
        )));
    }

    eprintln!("Starting health check for: {}", address);
    probe::probe(&address)
}
