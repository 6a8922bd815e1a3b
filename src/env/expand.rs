//! Variable expansion against an [`Env`].

use super::Env;

/// Expand `${VAR}` and `$VAR` references in `input` using `env`.
///
/// References to undefined variables are left unexpanded; the resolver's
/// pass loop relies on that when a later pass supplies the missing
/// definition.
pub fn expand(env: &Env, input: &str) -> String {
    shellexpand::env_with_context_no_errors(input, |name| env.get(name)).into_owned()
}
