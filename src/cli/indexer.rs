//! `pass-indexer`: publish a store into a target directory.

use std::path::PathBuf;

use clap::Parser;

use crate::cli::output;
use crate::core::cipher::Gpg;
use crate::core::config::{FileConfig, IndexerConfig, IndexerSection};
use crate::core::pipeline::{self, Report};
use crate::error::{CipherError, ConfigError, Error, ResolveError, Result};

/// Copy a pass password store into a folder of ASCII-armored secrets
/// with an encrypted index.
#[derive(Parser, Debug)]
#[command(name = "pass-indexer", version, about)]
pub struct Cli {
    /// Location of the PGP keyring [default: $HOME/.gnupg/pubring.gpg]
    #[arg(long, env = "PASS_SITE_KEYRING", value_name = "PATH")]
    pub keyring: Option<PathBuf>,

    /// Location of the password store [default: $HOME/.password-store]
    #[arg(long, env = "PASS_SITE_STORE", value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Target directory to generate pass-site files in [default: $HOME/.pass-site]
    #[arg(long, env = "PASS_SITE_TARGET", value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// gpg home directory used while listing keys and encrypting
    #[arg(long, env = "GNUPGHOME", value_name = "PATH")]
    pub gnupg_home: Option<PathBuf>,

    /// TOML config file with an [indexer] section
    #[arg(short, long, env = "PASS_SITE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn flags(&self) -> IndexerSection {
        IndexerSection {
            keyring: self.keyring.clone(),
            store: self.store.clone(),
            target: self.target.clone(),
            gnupg_home: self.gnupg_home.clone(),
        }
    }
}

/// Resolve configuration, run the pipeline and print a summary.
pub fn execute(cli: &Cli) -> Result<Report> {
    let file = FileConfig::load_optional(cli.config.as_deref())?;
    let home = dirs::home_dir();
    let config = IndexerConfig::resolve(cli.flags(), file.indexer, home.as_deref())?;

    let mut gpg = Gpg::new(&config.keyring);
    if let Some(home) = &config.gnupg_home {
        gpg = gpg.with_home(home);
    }

    let report = pipeline::run(&config, &gpg)?;

    output::success("site published");
    output::kv("recipients:", report.recipients.len());
    for recipient in &report.recipients {
        output::list_item(recipient);
    }
    output::kv("secrets:   ", report.secrets);
    output::kv("index:     ", output::path(&report.index_path.display().to_string()));

    Ok(report)
}

/// Suggested fix for common failures.
pub fn hint(error: &Error) -> Option<&'static str> {
    match error {
        Error::Config(ConfigError::MissingGpgId(_)) => Some("run: pass init <gpg-id>"),
        Error::Resolve(ResolveError::Unmatched(_)) => {
            Some("import the key into the keyring, or fix the store's .gpg-id")
        }
        Error::Cipher(CipherError::KeyringNotFound(_)) => Some("pass the keyring with --keyring"),
        _ => None,
    }
}
