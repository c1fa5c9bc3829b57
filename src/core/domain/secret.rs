//! Secret types.
//!
//! A secret is located by its path in the store; its index row is derived
//! from that path alone.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Location of one encrypted leaf file inside the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretLocation {
    path: PathBuf,
}

impl SecretLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Full path, including the store root.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Display for SecretLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// One row of the published index.
///
/// Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretEntry {
    pub domain: String,
    pub path: String,
    pub username: String,
    pub username_normalized: String,
}
