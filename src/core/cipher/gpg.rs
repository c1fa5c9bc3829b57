//! GPG cipher backend.
//!
//! Lists and encrypts to keys using GnuPG (GNU Privacy Guard).
//!
//! ## Requirements
//!
//! - `gpg` CLI must be installed
//! - the keyring file must hold the recipients' public keys
//!
//! Every invocation passes `--no-default-keyring --keyring <file>`, so
//! only keys from the configured keyring are ever listed or used.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tracing::trace;

use super::Cipher;
use crate::core::domain::Recipient;
use crate::error::{CipherError, Result};

/// GPG cipher backend using the gpg CLI
#[derive(Debug, Clone)]
pub struct Gpg {
    keyring: PathBuf,
    home: Option<PathBuf>,
}

impl Gpg {
    /// Backend bound to one keyring file.
    pub fn new(keyring: impl Into<PathBuf>) -> Self {
        Self {
            keyring: keyring.into(),
            home: None,
        }
    }

    /// Use `home` as the gpg home directory instead of `GNUPGHOME`/`~/.gnupg`.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Locate the gpg CLI.
    fn check_gpg() -> Result<PathBuf> {
        which::which("gpg").map_err(|_| CipherError::GpgNotFound.into())
    }

    /// Base command bound to the keyring.
    ///
    /// gpg resolves a relative `--keyring` against its home directory, so
    /// the path is canonicalized first.
    fn command(&self) -> Result<Command> {
        let gpg = Self::check_gpg()?;
        let keyring = self
            .keyring
            .canonicalize()
            .map_err(|_| CipherError::KeyringNotFound(self.keyring.clone()))?;

        let mut cmd = Command::new(gpg);
        if let Some(home) = &self.home {
            cmd.arg("--homedir").arg(home);
        }
        cmd.args(["--batch", "--no-tty", "--no-default-keyring", "--keyring"])
            .arg(keyring);
        Ok(cmd)
    }
}

impl Cipher for Gpg {
    fn name(&self) -> &'static str {
        "gpg"
    }

    fn recipients(&self) -> Result<Vec<Recipient>> {
        trace!(keyring = %self.keyring.display(), "listing keys with GPG");

        let output = self
            .command()?
            .args(["--with-colons", "--fixed-list-mode", "--list-keys"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| CipherError::Keyring(format!("failed to spawn gpg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(
                CipherError::Keyring(format!("gpg list-keys failed: {}", stderr.trim())).into(),
            );
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        let keys = parse_key_listing(&listing);

        trace!(keys = keys.len(), "listed keys with GPG");
        Ok(keys)
    }

    fn encrypt(&self, plaintext: &[u8], recipients: &[Recipient]) -> Result<Vec<u8>> {
        trace!(
            recipients = recipients.len(),
            plaintext_len = plaintext.len(),
            "encrypting with GPG"
        );

        if recipients.is_empty() {
            return Err(CipherError::NoRecipients.into());
        }

        let mut cmd = self.command()?;
        cmd.args([
            "--trust-model",
            "always", // the keyring itself is the trust anchor
            "--no-encrypt-to",
            "--encrypt",
        ]);

        // gpg encrypts once per key; repeated ids add nothing
        let mut seen: Vec<&str> = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            if !seen.contains(&recipient.key_id()) {
                seen.push(recipient.key_id());
                cmd.args(["--recipient", recipient.key_id()]);
            }
        }

        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| CipherError::EncryptionFailed(format!("failed to spawn gpg: {}", e)))?;

        // Feed stdin from another thread so a full stdout pipe cannot stall us.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = plaintext.to_vec();
            std::thread::spawn(move || stdin.write_all(&input))
        });

        let output = child
            .wait_with_output()
            .map_err(|e| CipherError::EncryptionFailed(format!("gpg command failed: {}", e)))?;

        let written = writer
            .map(|writer| writer.join())
            .transpose()
            .map_err(|_| CipherError::EncryptionFailed("stdin writer panicked".to_string()))?;
        check_encrypt(&output, written)?;

        trace!(ciphertext_len = output.stdout.len(), "encrypted with GPG");
        Ok(output.stdout)
    }
}

/// Outcome of an encrypt run.
///
/// gpg's own failure wins over the stdin writer's: when gpg exits early
/// the writer only sees a broken pipe.
fn check_encrypt(output: &Output, written: Option<std::io::Result<()>>) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(
            CipherError::EncryptionFailed(format!("gpg encrypt failed: {}", stderr.trim())).into(),
        );
    }
    if let Some(Err(e)) = written {
        return Err(
            CipherError::EncryptionFailed(format!("failed to write plaintext: {}", e)).into(),
        );
    }
    Ok(())
}

/// Parse `gpg --with-colons --list-keys` output into recipients.
///
/// Only `pub` records start a key. The first `fpr` after a `pub` is the
/// primary fingerprint; fingerprints of subkeys are ignored.
pub fn parse_key_listing(listing: &str) -> Vec<Recipient> {
    let mut keys = Vec::new();
    let mut current: Option<Recipient> = None;
    let mut primary_fpr = false;

    for line in listing.lines() {
        let fields: Vec<&str> = line.split(':').collect();
        match fields.first().copied() {
            Some("pub") => {
                keys.extend(current.take());
                primary_fpr = false;
                if let Some(key_id) = fields.get(4).filter(|id| !id.is_empty()) {
                    current = Some(Recipient::new(key_id));
                    primary_fpr = true;
                }
            }
            Some("fpr") if primary_fpr => {
                primary_fpr = false;
                if let Some(fpr) = fields.get(9).filter(|f| !f.is_empty()) {
                    current = current.map(|key| key.with_fingerprint(*fpr));
                }
            }
            Some("uid") => {
                if let Some(uid) = fields.get(9).filter(|u| !u.is_empty()) {
                    current = current.map(|key| key.with_user_id(*uid));
                }
            }
            Some("sub") => primary_fpr = false,
            _ => {}
        }
    }
    keys.extend(current);
    keys
}
