//! Model identification for cache slots and registry lookups

use std::fmt;

use serde::{Deserialize, Serialize};

/// A caller's request for a model: a registered name plus an optional pinned
/// version. An unspecified version means "the registry's current latest".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    pub version: Option<String>,
}

impl ModelSpec {
    /// Request the latest version of a model.
    pub fn latest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Request an exact version of a model.
    pub fn pinned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }
}

/// Value key for one cache slot: a model name and a concrete version.
///
/// "Latest" requests are resolved to a concrete version before keying, so an
/// unspecified version and an explicit version equal to the current latest
/// share a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelKey {
    name: String,
    version: String,
}

impl ModelKey {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}
