//! Command implementations for envwarp.
//!
//! This module provides the dispatcher that routes the two disjoint entry
//! points to their implementations: the rendering pipeline and the health
//! probe. They share no state and are never invoked together.

mod check;
mod run;

use crate::cli::Mode;
use crate::error::Result;

/// Dispatch a mode to its implementation.
pub fn dispatch(mode: Mode) -> Result<()> {
    match mode {
        Mode::Pipeline { env_files } => run::cmd_run(&env_files),
        Mode::Probe(args) => check::cmd_check(args),
    }
}
