//! Metadata index.
//!
//! Index rows are derived from the secret's location alone: for
//! `<store>/web/example.com/alice.gpg` the row is domain `example.com`,
//! path `web/example.com`, username `alice`. Ciphertext is never read.

use std::path::{Component, Path};

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::core::constants::SECRET_SUFFIX;
use crate::core::domain::{SecretEntry, SecretLocation};
use crate::error::{Result, StoreError};

/// Build one index row per secret, in the given order.
pub fn build(store: &Path, secrets: &[SecretLocation]) -> Vec<SecretEntry> {
    let entries: Vec<SecretEntry> = secrets
        .iter()
        .map(|secret| entry(&logical_name(store, secret.path())))
        .collect();
    debug!(entries = entries.len(), "index built");
    entries
}

/// Row for a store-relative logical name such as `web/example.com/alice`.
pub fn entry(name: &str) -> SecretEntry {
    let (path, username) = name.rsplit_once('/').unwrap_or(("", name));
    let domain = path.rsplit_once('/').map_or(path, |(_, last)| last);

    SecretEntry {
        domain: domain.to_string(),
        path: path.to_string(),
        username: username.to_string(),
        username_normalized: normalize(username),
    }
}

/// ASCII skeleton of `s` for fuzzy matching.
///
/// Compatibility decomposition (NFKD), then every non-ASCII code point is
/// dropped: `José` becomes `Jose`, `ﬁle` becomes `file`, `日本` becomes
/// the empty string.
pub fn normalize(s: &str) -> String {
    s.nfkd().filter(char::is_ascii).collect()
}

/// Serialize the index as compact JSON followed by a newline.
///
/// # Errors
///
/// Returns `StoreError::Serialize` if serialization fails.
pub fn to_json(entries: &[SecretEntry]) -> Result<Vec<u8>> {
    let mut json = serde_json::to_vec(entries).map_err(StoreError::Serialize)?;
    json.push(b'\n');
    Ok(json)
}

/// Store-relative, `/`-separated name without the secret suffix.
fn logical_name(store: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(store).unwrap_or(path);
    let name = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    match name.strip_suffix(SECRET_SUFFIX) {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}
