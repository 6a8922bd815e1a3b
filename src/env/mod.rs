//! The process-wide environment model.
//!
//! All pipeline stages share one mutable [`Env`] value instead of mutating
//! the real process environment. The map is seeded from the inherited
//! environment, mutated by the resolver and secret stages, read by the
//! template renderer, and materialized into an OS environment only at the
//! exec boundary. Keeping it owned makes ordering and convergence
//! observable in tests without touching global state.

mod expand;
mod resolver;


// Re-export public API
pub use expand::expand;
pub use resolver::{MAX_PASSES_PER_FILE, load_env_files};

use std::collections::BTreeMap;

/// Owned view of the process environment, mutated in place through the
/// pipeline. The single shared mutable resource of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: BTreeMap<String, String>,
}

impl Env {
    /// Snapshot the inherited process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Set a variable, returning whether the stored value changed.
    /// A previously unset variable counts as a change.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        match self.vars.get(name) {
            Some(existing) if existing == value => false,
            _ => {
                self.vars.insert(name.to_string(), value.to_string());
                true
            }
        }
    }

    /// Iterate over all variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
