//! Secret dereferencing for file-backed environment values.
//!
//! A value of the form `file.<path>` names a file whose first line is the
//! real value. Variables whose names end in `_FILE` are exempt so that
//! conventional `*_FILE` path passthroughs survive untouched.

use crate::env::Env;
use crate::error::{EnvwarpError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Value prefix marking a file-backed secret.
pub const SECRET_PREFIX: &str = "file.";

/// Name suffix exempting a variable from dereferencing.
const PASSTHROUGH_SUFFIX: &str = "_FILE";

/// Replace every `file.<path>` value in `env` with the first line of the
/// named file.
///
/// A path that does not exist is silently left untouched, so literal values
/// and real secret files can share the naming convention. Read failures
/// after a successful existence check are fatal.
pub fn resolve_secrets(env: &mut Env) -> Result<()> {
    let candidates: Vec<(String, String)> = env
        .iter()
        .filter(|(name, _)| !name.ends_with(PASSTHROUGH_SUFFIX))
        .filter_map(|(name, value)| {
            value
                .strip_prefix(SECRET_PREFIX)
                .map(|path| (name.to_string(), path.to_string()))
        })
        .collect();

    for (name, path) in candidates {
        let path = Path::new(&path);
        if !path.exists() {
            continue;
        }
        if let Some(secret) = read_first_line(path)? {
            env.set(&name, &secret);
            eprintln!("Loaded secret for {} from {}", name, path.display());
        }
    }
    Ok(())
}

/// Read the first line of `path`, stripping its line terminator.
///
/// Returns `None` for an empty file. The handle is scoped to this function
/// and released on every path, including early failure.
fn read_first_line(path: &Path) -> Result<Option<String>> {
    let file = File::open(path).map_err(|e| {
        EnvwarpError::Secret(format!(
            "failed to open secret file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut line = String::new();
    let read = BufReader::new(file).read_line(&mut line).map_err(|e| {
        EnvwarpError::Secret(format!(
            "failed to read secret file '{}': {}",
            path.display(),
            e
        ))
    })?;
    if read == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn secret_ref(path: &Path) -> String {
        format!("{}{}", SECRET_PREFIX, path.display())
    }

    #[test]
    fn dereferences_first_line_of_secret_file() {
        let dir = TempDir::new().unwrap();
        let secret = dir.path().join("db_password");
        fs::write(&secret, "s3cr3t\nsecond line\n").unwrap();

        let mut env = Env::default();
        env.set("DB_PASSWORD", &secret_ref(&secret));
        resolve_secrets(&mut env).unwrap();
        assert_eq!(env.get("DB_PASSWORD"), Some("s3cr3t"));
    }

    #[test]
    fn file_suffixed_names_are_exempt() {
        let dir = TempDir::new().unwrap();
        let secret = dir.path().join("db_password");
        fs::write(&secret, "s3cr3t\n").unwrap();
        let reference = secret_ref(&secret);

        let mut env = Env::default();
        env.set("DB_PASSWORD_FILE", &reference);
        resolve_secrets(&mut env).unwrap();
        assert_eq!(env.get("DB_PASSWORD_FILE"), Some(reference.as_str()));
    }

    #[test]
    fn missing_path_is_left_untouched() {
        let mut env = Env::default();
        env.set("TOKEN", "file./nonexistent-envwarp-secret");
        resolve_secrets(&mut env).unwrap();
        assert_eq!(env.get("TOKEN"), Some("file./nonexistent-envwarp-secret"));
    }

    #[test]
    fn empty_secret_file_is_left_untouched() {
        let dir = TempDir::new().unwrap();
        let secret = dir.path().join("empty");
        fs::write(&secret, "").unwrap();
        let reference = secret_ref(&secret);

        let mut env = Env::default();
        env.set("TOKEN", &reference);
        resolve_secrets(&mut env).unwrap();
        assert_eq!(env.get("TOKEN"), Some(reference.as_str()));
    }

    #[test]
    fn crlf_terminator_is_stripped() {
        let dir = TempDir::new().unwrap();
        let secret = dir.path().join("crlf");
        fs::write(&secret, "value\r\nrest\r\n").unwrap();

        let mut env = Env::default();
        env.set("TOKEN", &secret_ref(&secret));
        resolve_secrets(&mut env).unwrap();
        assert_eq!(env.get("TOKEN"), Some("value"));
    }

    #[test]
    fn unterminated_single_line_is_kept_whole() {
        let dir = TempDir::new().unwrap();
        let secret = dir.path().join("bare");
        fs::write(&secret, "no-newline").unwrap();

        let mut env = Env::default();
        env.set("TOKEN", &secret_ref(&secret));
        resolve_secrets(&mut env).unwrap();
        assert_eq!(env.get("TOKEN"), Some("no-newline"));
    }

    #[test]
    fn non_prefixed_values_are_ignored() {
        let mut env = Env::default();
        env.set("PLAIN", "just a value");
        env.set("PATHLIKE", "/etc/file.conf");
        resolve_secrets(&mut env).unwrap();
        assert_eq!(env.get("PLAIN"), Some("just a value"));
        assert_eq!(env.get("PATHLIKE"), Some("/etc/file.conf"));
    }
}
