//! Exit code constants for the envwarp CLI.
//!
//! Outcomes are binary:
//! - 0: Pipeline completed (or the probed endpoint is healthy)
//! - 1: Any fatal pipeline error, or the probe failed

/// Successful pipeline run or successful probe.
pub const SUCCESS: i32 = 0;

/// Fatal pipeline error or failed probe.
pub const FAILURE: i32 = 1;
