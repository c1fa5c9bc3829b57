//! Recipient resolution.
//!
//! The store declares who may read it in `.gpg-id`; the keyring says
//! which keys are trusted. Publication goes ahead only when every
//! declared identifier names a trusted key.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, trace};

use crate::core::constants::GPG_ID_FILE;
use crate::core::domain::Recipient;
use crate::error::{ConfigError, ResolveError, Result};

/// Read the authorized identifiers declared by a store.
///
/// One identifier per line; blank lines are skipped. Lines are not
/// trimmed.
///
/// # Errors
///
/// Returns `ConfigError::MissingGpgId` if the store has no `.gpg-id`.
pub fn read_ids(store: &Path) -> Result<Vec<String>> {
    let path = store.join(GPG_ID_FILE);
    debug!(path = %path.display(), "reading recipient ids");

    let contents = fs::read_to_string(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::MissingGpgId(store.to_path_buf()),
        _ => ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        },
    })?;

    let ids: Vec<String> = contents
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!(ids = ids.len(), "recipient ids read");
    Ok(ids)
}

/// Match each identifier to a keyring key, in declaration order.
///
/// The first key whose long or short id equals the identifier wins.
/// Duplicate identifiers yield duplicate recipients.
///
/// # Errors
///
/// Returns `ResolveError::Unmatched` for the first identifier with no
/// key, and `ResolveError::NoIdentifiers` if `ids` is empty. Nothing is
/// returned on failure.
pub fn resolve(ids: &[String], keyring: &[Recipient]) -> Result<Vec<Recipient>> {
    if ids.is_empty() {
        return Err(ResolveError::NoIdentifiers.into());
    }

    let mut resolved = Vec::with_capacity(ids.len());
    for id in ids {
        let key = keyring
            .iter()
            .find(|key| key.matches(id))
            .ok_or_else(|| ResolveError::Unmatched(id.clone()))?;
        trace!(id = %id, key = %key.key_id(), "resolved recipient");
        resolved.push(key.clone());
    }

    debug!(recipients = resolved.len(), "all recipient ids resolved");
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn keyring() -> Vec<Recipient> {
        vec![
            Recipient::new("1111111111111111"),
            Recipient::new("00000000ABCD1234"),
            Recipient::new("FFFFFFFFABCD1234"),
        ]
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_long_and_short_ids() {
        let resolved = resolve(&ids(&["1111111111111111", "ABCD1234"]), &keyring()).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].key_id(), "1111111111111111");
        assert_eq!(resolved[1].key_id(), "00000000ABCD1234");
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let resolved = resolve(&ids(&["ABCD1234"]), &keyring()).unwrap();
        assert_eq!(resolved[0].key_id(), "00000000ABCD1234");

        let resolved = resolve(&ids(&["FFFFFFFFABCD1234"]), &keyring()).unwrap();
        assert_eq!(resolved[0].key_id(), "FFFFFFFFABCD1234");
    }

    #[test]
    fn test_resolve_keeps_order_and_duplicates() {
        let resolved = resolve(
            &ids(&["11111111", "ABCD1234", "11111111"]),
            &keyring(),
        )
        .unwrap();
        let got: Vec<&str> = resolved.iter().map(|r| r.key_id()).collect();
        assert_eq!(
            got,
            ["1111111111111111", "00000000ABCD1234", "1111111111111111"]
        );
    }

    #[test]
    fn test_resolve_unmatched_names_token() {
        let err = resolve(&ids(&["ABCD1234", "DEADBEEF"]), &keyring()).unwrap_err();
        match err {
            Error::Resolve(ResolveError::Unmatched(id)) => assert_eq!(id, "DEADBEEF"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert!(resolve(&ids(&["abcd1234"]), &keyring()).is_err());
    }

    #[test]
    fn test_resolve_empty_ids() {
        assert!(matches!(
            resolve(&[], &keyring()),
            Err(Error::Resolve(ResolveError::NoIdentifiers))
        ));
    }

    #[test]
    fn test_read_ids_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(GPG_ID_FILE),
            "ABCD1234\n\nalice@example.com\r\n\n",
        )
        .unwrap();
        let got = read_ids(dir.path()).unwrap();
        assert_eq!(got, ["ABCD1234", "alice@example.com"]);
    }

    #[test]
    fn test_read_ids_keeps_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(GPG_ID_FILE), " ABCD1234").unwrap();
        assert_eq!(read_ids(dir.path()).unwrap(), [" ABCD1234"]);
    }

    #[test]
    fn test_read_ids_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_ids(dir.path()),
            Err(Error::Config(ConfigError::MissingGpgId(_)))
        ));
    }
}
