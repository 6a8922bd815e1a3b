//! Template discovery and rendering.
//!
//! A template source is either a single regular file (rendered whatever its
//! name) or a directory walked recursively for `*.template` files. Each
//! template maps to exactly one output file: same base name with the suffix
//! stripped, placed flat in the output directory.

use crate::env::{Env, expand};
use crate::error::{EnvwarpError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::WalkDir;

/// Filename suffix identifying templates during a directory walk.
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Render every discovered template under `template_path` into `conf_dir`.
///
/// Any stat, read, or write failure aborts remaining discovery and
/// rendering; files already written are kept.
pub fn render_all(env: &Env, template_path: &Path, conf_dir: &Path) -> Result<()> {
    ensure_conf_dir(conf_dir)?;

    let meta = fs::metadata(template_path).map_err(|e| {
        EnvwarpError::Template(format!(
            "cannot stat template path '{}': {}",
            template_path.display(),
            e
        ))
    })?;
    if !meta.is_dir() {
        return render_file(env, template_path, conf_dir);
    }

    for entry in WalkDir::new(template_path) {
        let entry = entry.map_err(|e| {
            EnvwarpError::Template(format!(
                "failed to walk template directory '{}': {}",
                template_path.display(),
                e
            ))
        })?;
        if entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(TEMPLATE_SUFFIX)
        {
            render_file(env, entry.path(), conf_dir)?;
        }
    }
    Ok(())
}

/// Create the output directory. Only the final path component is created;
/// a missing parent is fatal, as is an existing non-directory.
fn ensure_conf_dir(conf_dir: &Path) -> Result<()> {
    match fs::create_dir(conf_dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && conf_dir.is_dir() => Ok(()),
        Err(e) => Err(EnvwarpError::Template(format!(
            "failed to create output directory '{}': {}",
            conf_dir.display(),
            e
        ))),
    }
}

/// Expand one template file and write the result under `conf_dir`.
fn render_file(env: &Env, path: &Path, conf_dir: &Path) -> Result<()> {
    eprintln!("Processing template: {}", path.display());

    let raw = fs::read_to_string(path).map_err(|e| {
        EnvwarpError::Template(format!(
            "failed to read template '{}': {}",
            path.display(),
            e
        ))
    })?;
    let rendered = expand(env, &raw);

    let name = path
        .file_name()
        .ok_or_else(|| {
            EnvwarpError::Template(format!(
                "template path '{}' has no file name",
                path.display()
            ))
        })?
        .to_string_lossy();
    let out_name = name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(&name);
    let out_path = conf_dir.join(out_name);

    fs::write(&out_path, rendered).map_err(|e| {
        EnvwarpError::Template(format!("failed to write '{}': {}", out_path.display(), e))
    })?;
    eprintln!("Successfully written to: {}", out_path.display());
    Ok(())
}
