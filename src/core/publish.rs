//! Target tree writers.
//!
//! Secrets are armored as-is into a tree mirroring the store; the index
//! is encrypted to the resolved recipients and armored into `index.asc`.
//! Directories get mode 0700 and files 0600 on Unix.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};

use crate::core::armor;
use crate::core::cipher::Cipher;
use crate::core::constants::{
    ARMOR_SUFFIX, ARMOR_TYPE, DIR_MODE, FILE_MODE, INDEX_FILE, SECRET_SUFFIX,
};
use crate::core::domain::{Recipient, SecretLocation};
use crate::error::{Result, StoreError};

/// Armor every secret into the target tree.
///
/// `<store>/a/b/name.gpg` is written to `<target>/a/b/name.asc`. The
/// ciphertext is copied byte for byte inside the armor.
///
/// # Errors
///
/// Stops at the first secret that cannot be read or written; files
/// written before it are left in place.
pub fn armor_secrets(store: &Path, target: &Path, secrets: &[SecretLocation]) -> Result<usize> {
    debug!(secrets = secrets.len(), target = %target.display(), "armoring secrets");

    for secret in secrets {
        let dir = target.join(relative_parent(store, secret.path()));
        create_dir(&dir)?;

        let data = fs::read(secret.path()).map_err(|source| StoreError::Read {
            path: secret.path().to_path_buf(),
            source,
        })?;
        let armored = armor::encode(ARMOR_TYPE, &data);

        let dest = dir.join(armored_name(secret.path()));
        write_file(&dest, armored.as_bytes())?;
        trace!(from = %secret, to = %dest.display(), bytes = data.len(), "armored secret");
    }

    Ok(secrets.len())
}

/// Encrypt the serialized index and write it as `<target>/index.asc`.
///
/// The artifact is assembled in memory and written once.
///
/// # Errors
///
/// Returns `CipherError` if encryption fails and `StoreError` if the
/// file cannot be written.
pub fn write_index<C: Cipher>(
    target: &Path,
    cipher: &C,
    recipients: &[Recipient],
    index: &[u8],
) -> Result<PathBuf> {
    debug!(
        cipher = cipher.name(),
        recipients = recipients.len(),
        "encrypting index"
    );

    let ciphertext = cipher.encrypt(index, recipients)?;
    let armored = armor::encode(ARMOR_TYPE, &ciphertext);

    create_dir(target)?;
    let path = target.join(INDEX_FILE);
    write_file(&path, armored.as_bytes())?;

    debug!(path = %path.display(), "index written");
    Ok(path)
}

/// Parent directory of `path` relative to `store`.
///
/// Only plain components are kept, so the result can never escape the
/// directory it is joined onto.
fn relative_parent(store: &Path, path: &Path) -> PathBuf {
    let relative = path.strip_prefix(store).unwrap_or(path);
    relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .collect()
        })
        .unwrap_or_default()
}

/// `name.gpg` becomes `name.asc`.
fn armored_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(SECRET_SUFFIX).unwrap_or(&name);
    format!("{}{}", stem, ARMOR_SUFFIX)
}

fn create_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    #[cfg(not(unix))]
    let _ = DIR_MODE;

    builder.create(dir).map_err(|source| {
        StoreError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }
        .into()
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path).map_err(write_err)?;
    file.write_all(contents).map_err(write_err)?;

    // An existing file keeps its old mode through open(); reset it.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(FILE_MODE)).map_err(write_err)?;
    }
    #[cfg(not(unix))]
    let _ = FILE_MODE;

    Ok(())
}
