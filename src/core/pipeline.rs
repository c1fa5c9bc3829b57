//! The indexing pipeline.
//!
//! Stages run strictly in order and each result is checked before the
//! next stage starts:
//!
//! 1. read the store's recipient ids
//! 2. load the keyring
//! 3. resolve every id to a key
//! 4. enumerate secrets
//! 5. build and serialize the index
//! 6. armor secrets into the target
//! 7. encrypt and write the index
//!
//! Nothing touches the target before stage 6, so a resolution failure
//! publishes nothing. A failure in stage 6 or 7 leaves earlier writes in
//! place; re-running regenerates every artifact from the store.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::core::cipher::Cipher;
use crate::core::config::IndexerConfig;
use crate::core::domain::Recipient;
use crate::core::{index, publish, recipient, walk};
use crate::error::Result;

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct Report {
    /// Resolved recipients, in `.gpg-id` order.
    pub recipients: Vec<Recipient>,
    /// Number of secrets armored.
    pub secrets: usize,
    /// Location of the written index.
    pub index_path: PathBuf,
}

/// Run the pipeline once.
///
/// # Errors
///
/// Returns the first stage's error unchanged.
pub fn run<C: Cipher>(config: &IndexerConfig, cipher: &C) -> Result<Report> {
    debug!(store = %config.store.display(), "starting index run");

    let ids = recipient::read_ids(&config.store)?;
    let keyring = cipher.recipients()?;
    debug!(keys = keyring.len(), "keyring loaded");
    let recipients = recipient::resolve(&ids, &keyring)?;

    let secrets = walk::secrets(&config.store)?;

    let entries = index::build(&config.store, &secrets);
    let serialized = index::to_json(&entries)?;

    let armored = publish::armor_secrets(&config.store, &config.target, &secrets)?;

    let index_path = publish::write_index(&config.target, cipher, &recipients, &serialized)?;

    info!(
        recipients = recipients.len(),
        secrets = armored,
        index = %index_path.display(),
        "site published"
    );

    Ok(Report {
        recipients,
        secrets: armored,
        index_path,
    })
}
