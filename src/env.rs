//! Access to the environment variables a load reads and writes.

use std::collections::BTreeMap;

/// Flat variable name to value mapping.
pub type FlatMap = BTreeMap<String, String>;

/// Environment accessor used by the loader.
pub trait Environment {
    /// Snapshot of every variable currently set.
    fn get_all(&self) -> FlatMap;

    /// Write a batch of variables.
    fn set_many(&mut self, entries: &FlatMap);
}

/// The real process environment.
///
/// Names and values that are not valid unicode appear in the snapshot
/// lossily converted, so such variables still count as set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get_all(&self) -> FlatMap {
        std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    /// Entries must satisfy [`check_variable`]; the loader checks every
    /// candidate before a batch is written.
    fn set_many(&mut self, entries: &FlatMap) {
        for (key, value) in entries {
            // SAFETY: callers serialize loads that mutate the process
            // environment; concurrent loads are outside the contract.
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

/// Reason `key=value` cannot be stored as an environment variable.
pub fn check_variable(key: &str, value: &str) -> Option<&'static str> {
    if key.is_empty() {
        Some("name is empty")
    } else if key.contains('=') {
        Some("name contains '='")
    } else if key.contains('\0') {
        Some("name contains a NUL byte")
    } else if value.contains('\0') {
        Some("value contains a NUL byte")
    } else {
        None
    }
}

/// In-memory environment for tests and embedding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: FlatMap,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Environment for MemoryEnv {
    fn get_all(&self) -> FlatMap {
        self.vars.clone()
    }

    fn set_many(&mut self, entries: &FlatMap) {
        self.vars
            .extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}
