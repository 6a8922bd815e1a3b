//! Error types for the envwarp CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error
//! messages. There is no retry and no partial-success mode: every fatal
//! condition terminates the process with a single diagnostic line.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for envwarp operations.
///
/// Variants follow the failure domains of the pipeline; all of them map to
/// the same non-zero exit status.
#[derive(Error, Debug)]
pub enum EnvwarpError {
    /// Missing or invalid configuration: required variables unset, empty
    /// execution command, unresolvable executable.
    #[error("{0}")]
    Config(String),

    /// Reading, expanding, or parsing an environment file failed.
    #[error("{0}")]
    EnvFile(String),

    /// Reading a secret file failed after it was found on disk.
    #[error("{0}")]
    Secret(String),

    /// Template discovery or rendering failed.
    #[error("{0}")]
    Template(String),

    /// Replacing the process image failed.
    #[error("{0}")]
    Exec(String),

    /// A health probe failed or used an unsupported scheme.
    #[error("{0}")]
    Probe(String),
}

impl EnvwarpError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            EnvwarpError::Config(_)
            | EnvwarpError::EnvFile(_)
            | EnvwarpError::Secret(_)
            | EnvwarpError::Template(_)
            | EnvwarpError::Exec(_)
            | EnvwarpError::Probe(_) => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for envwarp operations.
pub type Result<T> = std::result::Result<T, EnvwarpError>;
