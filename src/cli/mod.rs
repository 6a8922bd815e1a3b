//! CLI argument parsing for envwarp.
//!
//! Uses clap derive macros for declarative argument definitions. This module
//! defines the argument surface and the top-level mode split; actual
//! implementations are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Version string baked in at build time via the `ENVWARP_VERSION`
/// environment variable; a literal placeholder stands in when unset.
pub const VERSION: &str = match option_env!("ENVWARP_VERSION") {
    Some(version) => version,
    None => "v0.0.0-dev",
};

/// Envwarp: container entrypoint utility.
///
/// Without a subcommand, runs the rendering pipeline:
/// - loads custom environment files (in order, multi-pass)
/// - dereferences `file.<path>` secret values
/// - renders `ENVWARP_TEMPLATE` into `ENVWARP_CONFDIR`
/// - optionally execs `ENVWARP_EXECUTION`
#[derive(Parser, Debug)]
#[command(name = "envwarp")]
#[command(version = VERSION, disable_version_flag = true)]
#[command(about = "Container entrypoint: resolve env files and secrets, render templates, exec", long_about = None)]
pub struct Cli {
    /// Path to a custom environment file (can be specified multiple times).
    ///
    /// Files are applied in the order given; later files may reference
    /// variables defined by earlier ones.
    #[arg(short = 'e', long = "env", value_name = "PATH")]
    pub env_files: Vec<PathBuf>,

    /// Print version and exit.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands for envwarp.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Probe a service endpoint for liveness.
    ///
    /// Supports `http://host[:port][/path]` (HEAD request, healthy while the
    /// status code stays below 500) and `unix://path` (connect test).
    /// Intended as a container orchestrator health check; exits 0 on
    /// success, 1 on failure.
    Check(CheckArgs),
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Address to probe; falls back to ENVWARP_CHECKURL when omitted.
    pub address: Option<String>,
}

/// Top-level execution mode.
///
/// The rendering pipeline and the health probe share no state and are never
/// combined in one invocation.
#[derive(Debug)]
pub enum Mode {
    /// Resolve env files, dereference secrets, render templates, maybe exec.
    Pipeline { env_files: Vec<PathBuf> },
    /// Probe an endpoint and report health via the exit status.
    Probe(CheckArgs),
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Split the parsed arguments into the two disjoint entry points.
    pub fn into_mode(self) -> Mode {
        match self.command {
            Some(Command::Check(args)) => Mode::Probe(args),
            None => Mode::Pipeline {
                env_files: self.env_files,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_selects_the_pipeline() {
        let cli = Cli::try_parse_from(["envwarp"]).unwrap();
        match cli.into_mode() {
            Mode::Pipeline { env_files } => assert!(env_files.is_empty()),
            other => panic!("expected pipeline mode, got {:?}", other),
        }
    }

    #[test]
    fn env_flags_are_repeatable_and_ordered() {
        let cli = Cli::try_parse_from(["envwarp", "-e", "a.env", "--env", "b.env"]).unwrap();
        assert_eq!(
            cli.env_files,
            vec![PathBuf::from("a.env"), PathBuf::from("b.env")]
        );
    }

    #[test]
    fn check_subcommand_selects_the_probe() {
        let cli = Cli::try_parse_from(["envwarp", "check", "http://localhost:8080"]).unwrap();
        match cli.into_mode() {
            Mode::Probe(args) => {
                assert_eq!(args.address.as_deref(), Some("http://localhost:8080"));
            }
            other => panic!("expected probe mode, got {:?}", other),
        }
    }

    #[test]
    fn check_address_is_optional() {
        let cli = Cli::try_parse_from(["envwarp", "check"]).unwrap();
        match cli.into_mode() {
            Mode::Probe(args) => assert!(args.address.is_none()),
            other => panic!("expected probe mode, got {:?}", other),
        }
    }

    #[test]
    fn short_v_prints_version() {
        let err = Cli::try_parse_from(["envwarp", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn version_placeholder_is_used_when_unset() {
        // Builds without ENVWARP_VERSION injected fall back to the
        // placeholder; either way the string is non-empty.
        assert!(!VERSION.is_empty());
    }
}
