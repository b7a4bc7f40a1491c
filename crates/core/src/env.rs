//! Environment derivation
//!
//! An env is configuration injected into invocations whose resolution path
//! passes through its uri.

use rmpv::Value;

use crate::uri::Uri;

/// Configuration declared for one uri
#[derive(Debug, Clone, PartialEq)]
pub struct Env {
    pub uri: Uri,
    pub env: Value,
}

impl Env {
    pub fn new(uri: Uri, env: Value) -> Self {
        Self { uri, env }
    }
}

/// Find the env for a resolution path.
///
/// The path is ordered from the requested uri to the resolved one; a match
/// closer to the end wins. No match is not an error.
pub fn get_env_from_resolution_path<'a>(path: &[Uri], envs: &'a [Env]) -> Option<&'a Env> {
    path.iter()
        .rev()
        .find_map(|uri| envs.iter().find(|env| &env.uri == uri))
}

/// Shallow-merge `other` into `base`. Map keys in `other` override; any
/// non-map value replaces `base` entirely.
pub fn merge_env(base: &mut Value, other: Value) {
    match (base, other) {
        (Value::Map(base_entries), Value::Map(other_entries)) => {
            for (key, value) in other_entries {
                match base_entries.iter_mut().find(|(k, _)| *k == key) {
                    Some(entry) => entry.1 = value,
                    None => base_entries.push((key, value)),
                }
            }
        }
        (base, other) => *base = other,
    }
}
