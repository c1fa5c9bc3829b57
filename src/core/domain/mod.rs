//! Domain types.

mod recipient;
mod secret;

pub use recipient::Recipient;
pub use secret::{SecretEntry, SecretLocation};
