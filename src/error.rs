//! Error types.
//!
//! Each concern has its own error enum; all of them fold into [`Error`]
//! so the pipeline can propagate with `?` and the binaries can report a
//! single message.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for every fallible operation in the crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Armor(#[from] ArmorError),

    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration and input errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no .gpg-id in store {}", .0.display())]
    MissingGpgId(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unable to determine home directory")]
    NoHomeDir,

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Recipient resolution errors.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("store declares no recipient identifiers")]
    NoIdentifiers,

    #[error("key with ID {0} not found")]
    Unmatched(String),
}

/// Keyring and encryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("gpg CLI not found. Install GnuPG from https://gnupg.org/download/")]
    GpgNotFound,

    #[error("keyring not found: {}", .0.display())]
    KeyringNotFound(PathBuf),

    #[error("failed to read keyring: {0}")]
    Keyring(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("no recipients to encrypt to")]
    NoRecipients,
}

/// Filesystem errors while walking the store or writing the target.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to walk store: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// ASCII armor decoding errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArmorError {
    #[error("no armor header line")]
    MissingBegin,

    #[error("no armor tail line for {0}")]
    MissingEnd(String),

    #[error("armor type mismatch: BEGIN {begin}, END {end}")]
    TypeMismatch { begin: String, end: String },

    #[error("invalid base64 in armor body: {0}")]
    Base64(String),

    #[error("armor checksum mismatch: expected {expected:06X}, got {actual:06X}")]
    Checksum { expected: u32, actual: u32 },
}

/// Per-request proxy errors. Each maps to one HTTP status.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("404 page not found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    BadContentType(String),

    #[error("{0}")]
    InvalidBody(String),

    #[error("{0}")]
    Request(String),

    #[error("{reason}")]
    Upstream { status: u16, reason: String },

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
