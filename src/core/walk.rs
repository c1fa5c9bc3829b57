//! Secret tree enumeration.
//!
//! Every `*.gpg` file below the store root is a secret, except files
//! directly at the root (where `.gpg-id` and friends live) and anything
//! inside a `.git` directory.

use std::path::Path;

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::core::constants::{GIT_DIR, SECRET_SUFFIX};
use crate::core::domain::SecretLocation;
use crate::error::{Result, StoreError};

/// Enumerate the secrets of a store.
///
/// Entries are visited depth-first, sorted by file name within each
/// directory. Symlinks are not followed.
///
/// # Errors
///
/// Returns `StoreError::NotFound` if `store` is not a directory and
/// `StoreError::Walk` on the first error while walking; no partial list
/// is returned.
pub fn secrets(store: &Path) -> Result<Vec<SecretLocation>> {
    if !store.is_dir() {
        return Err(StoreError::NotFound(store.to_path_buf()).into());
    }
    debug!(store = %store.display(), "enumerating secrets");

    let mut found = Vec::new();
    let walker = WalkDir::new(store)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_git_dir(entry));

    for entry in walker {
        let entry = entry.map_err(StoreError::Walk)?;
        if entry.file_type().is_dir() || entry.depth() < 2 {
            continue;
        }
        if is_secret(&entry) {
            trace!(path = %entry.path().display(), "found secret");
            found.push(SecretLocation::new(entry.into_path()));
        }
    }

    debug!(secrets = found.len(), "secrets enumerated");
    Ok(found)
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == GIT_DIR
}

fn is_secret(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.ends_with(SECRET_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn relative(store: &Path, found: &[SecretLocation]) -> Vec<String> {
        found
            .iter()
            .map(|s| {
                s.path()
                    .strip_prefix(store)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_excludes_root_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".gpg-id");
        touch(dir.path(), "toplevel.gpg");
        touch(dir.path(), "example.com/alice.gpg");

        let found = secrets(dir.path()).unwrap();
        assert_eq!(relative(dir.path(), &found), ["example.com/alice.gpg"]);
    }

    #[test]
    fn test_prunes_git_at_any_depth() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".git/objects/leak.gpg");
        touch(dir.path(), "work/.git/deep.gpg");
        touch(dir.path(), "work/bob.gpg");

        let found = secrets(dir.path()).unwrap();
        assert_eq!(relative(dir.path(), &found), ["work/bob.gpg"]);
    }

    #[test]
    fn test_only_gpg_suffix() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "site/.gpg-id");
        touch(dir.path(), "site/notes.txt");
        touch(dir.path(), "site/alice.gpg.bak");
        touch(dir.path(), "site/alice.gpg");

        let found = secrets(dir.path()).unwrap();
        assert_eq!(relative(dir.path(), &found), ["site/alice.gpg"]);
    }

    #[test]
    fn test_nested_and_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.org/zed.gpg");
        touch(dir.path(), "a.com/mail/bob.gpg");
        touch(dir.path(), "a.com/alice.gpg");

        let found = secrets(dir.path()).unwrap();
        assert_eq!(
            relative(dir.path(), &found),
            ["a.com/alice.gpg", "a.com/mail/bob.gpg", "b.org/zed.gpg"]
        );
    }

    #[test]
    fn test_directory_named_like_secret_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("site/folder.gpg")).unwrap();

        assert!(secrets(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_store() {
        let dir = TempDir::new().unwrap();
        assert!(secrets(&dir.path().join("absent")).is_err());
    }
}
