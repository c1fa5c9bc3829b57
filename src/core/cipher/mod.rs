//! Encryption backends.
//!
//! The pipeline needs two things from OpenPGP: the public keys of a
//! trusted keyring, and encryption of a payload to a chosen subset of
//! them. Both sit behind the [`Cipher`] trait so the pipeline never
//! depends on a concrete implementation.
//!
//! ## Backends
//!
//! - **gpg**: the default. Drives the `gpg` CLI against a single keyring
//!   file, isolated from the user's default keyrings.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use crate::core::domain::Recipient;
use crate::error::Result;

mod gpg;

pub use gpg::{parse_key_listing, Gpg};

/// OpenPGP backend trait.
pub trait Cipher {
    /// Every public key in the configured keyring, in keyring order.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if the keyring is missing or unreadable.
    fn recipients(&self) -> Result<Vec<Recipient>>;

    /// Encrypt `plaintext` so that any of `recipients` can decrypt it.
    ///
    /// Returns binary (unarmored) ciphertext. No signature is added.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if encryption fails.
    fn encrypt(&self, plaintext: &[u8], recipients: &[Recipient]) -> Result<Vec<u8>>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}
