//! Fake cipher for pipeline tests.

use std::cell::RefCell;

use pass_site::core::cipher::Cipher;
use pass_site::core::domain::Recipient;
use pass_site::error::{CipherError, Result};

/// Prefix the fake cipher puts in front of the plaintext.
pub const FAKE_MARKER: &[u8] = b"FAKE-PGP:";

/// Cipher backed by a fixed keyring that "encrypts" by prefixing a
/// marker, and records every call.
pub struct FakeCipher {
    keyring: Vec<Recipient>,
    fail_encrypt: bool,
    pub encrypted_to: RefCell<Vec<Vec<String>>>,
}

impl FakeCipher {
    pub fn new(keys: &[&str]) -> Self {
        Self {
            keyring: keys.iter().map(|k| Recipient::new(k)).collect(),
            fail_encrypt: false,
            encrypted_to: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(keys: &[&str]) -> Self {
        Self {
            fail_encrypt: true,
            ..Self::new(keys)
        }
    }

    /// Undo the fake encryption.
    pub fn open(ciphertext: &[u8]) -> &[u8] {
        ciphertext
            .strip_prefix(FAKE_MARKER)
            .expect("not produced by FakeCipher")
    }
}

impl Cipher for FakeCipher {
    fn recipients(&self) -> Result<Vec<Recipient>> {
        Ok(self.keyring.clone())
    }

    fn encrypt(&self, plaintext: &[u8], recipients: &[Recipient]) -> Result<Vec<u8>> {
        self.encrypted_to
            .borrow_mut()
            .push(recipients.iter().map(|r| r.key_id().to_string()).collect());
        if self.fail_encrypt {
            return Err(CipherError::EncryptionFailed("fake failure".to_string()).into());
        }
        let mut out = FAKE_MARKER.to_vec();
        out.extend_from_slice(plaintext);
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
