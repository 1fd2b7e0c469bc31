//! Environment source: an injected snapshot of process variables

use std::collections::BTreeMap;

use crate::tag::TaggedProperty;
use crate::translate;

/// An immutable snapshot of environment variables.
///
/// Construction reads from a snapshot rather than from global state, so the
/// same snapshot always yields the same dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        let mut vars = BTreeMap::new();
        for (name, value) in std::env::vars_os() {
            match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => {
                    vars.insert(name, value);
                }
                (name, _) => {
                    tracing::debug!(?name, "Skipping non UTF-8 environment variable");
                }
            }
        }
        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Set or replace a variable in the snapshot.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Remove a variable from the snapshot.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Read every variable in the snapshot as a generic property.
///
/// Names are translated to their friendly form. When a translated variable
/// and a raw variable end up with the same name, the translated one wins.
pub fn read_environment(env: &EnvSnapshot, source_rank: usize) -> Vec<TaggedProperty> {
    let mut by_name: BTreeMap<&str, (&str, bool)> = BTreeMap::new();

    for (raw, value) in env.iter() {
        let translated = translate::is_translated(raw);
        let name = translate::translate(raw);
        if translated {
            tracing::debug!(raw, name, "Translated environment variable");
        }
        match by_name.get(name) {
            Some((_, true)) if !translated => {}
            _ => {
                by_name.insert(name, (value, translated));
            }
        }
    }

    tracing::debug!(count = by_name.len(), source_rank, "Read environment source");

    by_name
        .into_iter()
        .map(|(name, (value, _))| TaggedProperty::generic(name, value, source_rank))
        .collect()
}
