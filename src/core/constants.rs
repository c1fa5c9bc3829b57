//! Constants used throughout pass-site.
//!
//! Centralizes well-known file names, suffixes and defaults.

/// Recipient identifier list at the store root.
pub const GPG_ID_FILE: &str = ".gpg-id";

/// Suffix of an encrypted secret inside the store.
pub const SECRET_SUFFIX: &str = ".gpg";

/// Suffix of an armored artifact in the target directory.
pub const ARMOR_SUFFIX: &str = ".asc";

/// Name of the encrypted index inside the target directory.
pub const INDEX_FILE: &str = "index.asc";

/// Directory pruned from the store walk at any depth.
pub const GIT_DIR: &str = ".git";

/// Armor block type for secrets and the index.
pub const ARMOR_TYPE: &str = "PGP MESSAGE";

/// Mode for directories created in the target tree.
pub const DIR_MODE: u32 = 0o700;

/// Mode for files written to the target tree.
pub const FILE_MODE: u32 = 0o600;

/// Keyring location relative to HOME.
pub const DEFAULT_KEYRING: &str = ".gnupg/pubring.gpg";

/// Store location relative to HOME.
pub const DEFAULT_STORE: &str = ".password-store";

/// Target location relative to HOME.
pub const DEFAULT_TARGET: &str = ".pass-site";

/// Proxy listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:7277";

/// Base URL of the static server that serves the target directory.
pub const DEFAULT_UPSTREAM: &str = "http://127.0.0.1:80/";

/// Upstream fetch deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Media type the proxy accepts and returns.
pub const JSON_MEDIA_TYPE: &str = "application/json";
