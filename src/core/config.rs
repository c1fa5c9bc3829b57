//! Configuration.
//!
//! Each binary builds one explicit config struct at startup from, in
//! order of precedence: command-line flags (or their env vars), an
//! optional TOML file, built-in defaults rooted at `$HOME`.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Contents of the optional TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub indexer: IndexerSection,
    #[serde(default)]
    pub proxy: ProxySection,
}

/// Indexer settings, each optional so layers can be merged.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexerSection {
    pub keyring: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub gnupg_home: Option<PathBuf>,
}

/// Proxy settings, each optional so layers can be merged.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxySection {
    pub listen: Option<String>,
    pub target: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read, or
    /// `ConfigError::Parse` if the TOML is malformed or has unknown keys.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents).map_err(ConfigError::Parse)?)
    }

    /// Load `path` if given, otherwise an empty config.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Resolved indexer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Public keyring the recipients are taken from.
    pub keyring: PathBuf,
    /// Root of the password store.
    pub store: PathBuf,
    /// Directory the artifacts are written to.
    pub target: PathBuf,
    /// gpg home directory, if not the gpg default.
    pub gnupg_home: Option<PathBuf>,
}

impl IndexerConfig {
    /// Merge flags over the file section over defaults under `home`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if a default is needed and no home
    /// directory is known.
    pub fn resolve(
        flags: IndexerSection,
        file: IndexerSection,
        home: Option<&Path>,
    ) -> Result<Self> {
        let pick = |flag: Option<PathBuf>, file: Option<PathBuf>, default: &str| {
            flag.or(file)
                .or_else(|| home.map(|h| h.join(default)))
                .ok_or(ConfigError::NoHomeDir)
        };

        let config = Self {
            keyring: pick(flags.keyring, file.keyring, constants::DEFAULT_KEYRING)?,
            store: pick(flags.store, file.store, constants::DEFAULT_STORE)?,
            target: pick(flags.target, file.target, constants::DEFAULT_TARGET)?,
            gnupg_home: flags.gnupg_home.or(file.gnupg_home),
        };
        debug!(
            keyring = %config.keyring.display(),
            store = %config.store.display(),
            target = %config.target.display(),
            "indexer config resolved"
        );
        Ok(config)
    }
}

/// Resolved proxy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub listen: SocketAddr,
    /// Base URL the artifact location is appended to.
    pub target: String,
    /// Upstream fetch deadline; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ProxyConfig {
    /// Merge flags over the file section over defaults.
    ///
    /// A timeout of zero seconds disables the deadline.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unparseable listen
    /// address or a target that is not an http(s) URL.
    pub fn resolve(flags: ProxySection, file: ProxySection) -> Result<Self> {
        let listen = flags
            .listen
            .or(file.listen)
            .unwrap_or_else(|| constants::DEFAULT_LISTEN.to_string());
        let listen: SocketAddr = listen.parse().map_err(|e| ConfigError::InvalidValue {
            field: "listen",
            reason: format!("{}: {}", listen, e),
        })?;

        let target = flags
            .target
            .or(file.target)
            .unwrap_or_else(|| constants::DEFAULT_UPSTREAM.to_string());
        validate_target(&target)?;

        let timeout = match flags
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(constants::DEFAULT_TIMEOUT_SECS)
        {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        debug!(listen = %listen, target = %target, ?timeout, "proxy config resolved");
        Ok(Self {
            listen,
            target,
            timeout,
        })
    }
}

fn validate_target(target: &str) -> Result<()> {
    let url = reqwest::Url::parse(target).map_err(|e| ConfigError::InvalidValue {
        field: "target",
        reason: format!("{}: {}", target, e),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field: "target",
            reason: format!("{}: scheme must be http or https", target),
        }
        .into());
    }
    Ok(())
}
