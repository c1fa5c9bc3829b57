//! Test support utilities for pass-site integration tests.
//!
//! Provides isolated store/target directories and a recording cipher.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use pass_site::core::config::IndexerConfig;

/// Test environment with isolated temp directories.
///
/// Each test gets its own store, target and home. No process-global
/// state is mutated, so tests can run in parallel.
pub struct Test {
    /// Root of the temp tree
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        Self { dir, home }
    }

    /// Test environment whose store has a `.gpg-id` listing `ids`.
    pub fn with_ids(ids: &[&str]) -> Self {
        let t = Self::new();
        let mut contents = ids.join("\n");
        contents.push('\n');
        t.write_store(".gpg-id", contents.as_bytes());
        t
    }

    pub fn store(&self) -> PathBuf {
        self.dir.path().join("secrets")
    }

    pub fn target(&self) -> PathBuf {
        self.dir.path().join("site")
    }

    pub fn keyring(&self) -> PathBuf {
        self.dir.path().join("pubring.gpg")
    }

    /// Write `contents` to `<store>/<rel>`, creating parents.
    pub fn write_store(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let path = self.store().join(rel);
        std::fs::create_dir_all(path.parent().expect("store path has a parent"))
            .expect("failed to create store dirs");
        std::fs::write(&path, contents).expect("failed to write store file");
        path
    }

    pub fn read_target(&self, rel: &str) -> String {
        std::fs::read_to_string(self.target().join(rel))
            .unwrap_or_else(|e| panic!("failed to read {}: {}", rel, e))
    }

    pub fn target_exists(&self, rel: &str) -> bool {
        self.target().join(rel).exists()
    }

    pub fn config(&self) -> IndexerConfig {
        IndexerConfig {
            keyring: self.keyring(),
            store: self.store(),
            target: self.target(),
            gnupg_home: None,
        }
    }

    /// `pass-indexer` with HOME pointed at the temp home and no
    /// inherited configuration.
    pub fn indexer(&self) -> Command {
        Self::bin("pass-indexer", self.home.path())
    }

    pub fn proxy(&self) -> Command {
        Self::bin("pass-proxy", self.home.path())
    }

    fn bin(name: &str, home: &Path) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin(name).expect("failed to find binary");
        cmd.env("HOME", home)
            .env("USERPROFILE", home)
            .env("NO_COLOR", "1")
            .env_remove("PASS_SITE_KEYRING")
            .env_remove("PASS_SITE_STORE")
            .env_remove("PASS_SITE_TARGET")
            .env_remove("PASS_SITE_CONFIG")
            .env_remove("PASS_SITE_LOG")
            .env_remove("GNUPGHOME");
        cmd
    }
}
