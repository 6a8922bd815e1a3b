//! Process replacement.
//!
//! The launcher replaces the current process image in place, without
//! forking; on success nothing after it runs, so its return type only
//! carries failures and callers must treat the call as terminal.

use crate::env::Env;
use crate::error::EnvwarpError;
use std::os::unix::process::CommandExt;
use std::process::Command;

/// Resolve `command` and replace the current process with it, using `env`
/// as the complete environment of the new image.
///
/// The command is split on whitespace with no quoting semantics, so
/// arguments containing spaces cannot be expressed. The first token is
/// resolved against the executable search path.
pub fn exec_command(command: &str, env: &Env) -> EnvwarpError {
    let tokens: Vec<&str> = command.split_whitespace().collect();
    let Some((program, args)) = tokens.split_first() else {
        return EnvwarpError::Config("execution command is empty".to_string());
    };

    let resolved = match which::which(program) {
        Ok(path) => path,
        Err(_) => {
            return EnvwarpError::Config(format!("command not found in PATH: {}", program));
        }
    };

    eprintln!("Executing command: {}", command);

    let err = Command::new(&resolved)
        .args(args)
        .env_clear()
        .envs(env.iter())
        .exec();
    EnvwarpError::Exec(format!(
        "failed to execute '{}': {}",
        resolved.display(),
        err
    ))
}
