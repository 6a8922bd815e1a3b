//! The rendering pipeline: env files, secrets, templates, optional exec.

use crate::env::{self, Env};
use crate::error::{EnvwarpError, Result};
use crate::{launcher, secrets, template};
use std::path::PathBuf;

/// Variable naming the template source (file or directory).
pub const TEMPLATE_VAR: &str = "ENVWARP_TEMPLATE";
/// Variable naming the output directory.
pub const CONFDIR_VAR: &str = "ENVWARP_CONFDIR";
/// Variable holding the optional command to exec after rendering.
pub const EXECUTION_VAR: &str = "ENVWARP_EXECUTION";

/// Run the full pipeline.
///
/// Stages run strictly in order over one shared environment: resolver,
/// secret dereferencing, template rendering, then the optional process
/// replacement, which never returns on success.
pub fn cmd_run(env_files: &[PathBuf]) -> Result<()> {
    let mut env = Env::from_process();

    // Snapshot before any loading so templating-only variables never leak
    // into the launched process.
    let snapshot = (!env_files.is_empty()).then(|| env.clone());

    if !env_files.is_empty() {
        let names: Vec<String> = env_files.iter().map(|p| p.display().to_string()).collect();
        eprintln!("Loading custom environment files: {}", names.join(", "));
        env::load_env_files(&mut env, env_files)?;
    }

    secrets::resolve_secrets(&mut env)?;

    let template_path = required_var(&env, TEMPLATE_VAR)?;
    let conf_dir = required_var(&env, CONFDIR_VAR)?;
    template::render_all(&env, &template_path, &conf_dir)?;
    eprintln!("All templates processed successfully.");

    if let Some(command) = env.get(EXECUTION_VAR)
        && !command.is_empty()
    {
        let launch_env = snapshot.as_ref().unwrap_or(&env);
        return Err(launcher::exec_command(command, launch_env));
    }
    Ok(())
}

fn required_var(env: &Env, name: &str) -> Result<PathBuf> {
    match env.get(name) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Err(EnvwarpError::Config(format!(
            "{} and {} environment variables must be set",
            TEMPLATE_VAR, CONFDIR_VAR
        ))),
    }
}
