//! Multi-pass resolution of ordered environment files.
//!
//! Each file is expanded against the current environment, parsed, and
//! applied repeatedly until a pass changes nothing, so definitions may
//! reference variables from earlier lines, earlier passes, or earlier
//! files. The pass cap bounds pathological self-referential definitions.

use super::{Env, expand};
use crate::error::{EnvwarpError, Result};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Upper bound on expansion passes for a single file. Hitting the cap is
/// not an error; the file is applied as-is and the pipeline continues.
pub const MAX_PASSES_PER_FILE: usize = 5;

/// Load `files` into `env`, in order, stabilizing each file before the
/// next begins. Any read or parse failure is fatal to the whole run.
pub fn load_env_files(env: &mut Env, files: &[PathBuf]) -> Result<()> {
    for file in files {
        stabilize_file(env, file)?;
    }
    Ok(())
}

/// Apply one file until a pass produces zero changes, or the cap is hit.
fn stabilize_file(env: &mut Env, path: &Path) -> Result<()> {
    for pass in 1..=MAX_PASSES_PER_FILE {
        let raw = fs::read_to_string(path).map_err(|e| {
            EnvwarpError::EnvFile(format!("failed to read env file '{}': {}", path.display(), e))
        })?;
        let expanded = expand(env, &raw);

        let mut changed = 0usize;
        for (key, value) in parse_env(&expanded, path)? {
            if env.set(&key, &value) {
                changed += 1;
            }
        }

        if changed == 0 {
            return Ok(());
        }
        if pass == MAX_PASSES_PER_FILE {
            // Still changing at the cap: likely a cyclic reference. Keep
            // whatever the last pass produced and let the pipeline continue.
            eprintln!(
                "Warning: env file '{}' did not stabilize after {} passes; continuing",
                path.display(),
                MAX_PASSES_PER_FILE
            );
        }
    }
    Ok(())
}

/// Parse expanded env-file content into key/value pairs in file order.
fn parse_env(content: &str, path: &Path) -> Result<Vec<(String, String)>> {
    dotenvy::from_read_iter(Cursor::new(content))
        .map(|item| {
            item.map_err(|e| {
                EnvwarpError::EnvFile(format!(
                    "failed to parse env file '{}': {}",
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}
