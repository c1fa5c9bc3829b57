//! `pass-proxy`: serve the target directory to the legacy client.

use std::path::PathBuf;

use clap::Parser;

use crate::core::config::{FileConfig, ProxyConfig, ProxySection};
use crate::error::Result;
use crate::proxy;

/// Compatibility layer letting the legacy browser extension read a
/// pass-indexer target directory served by a regular web server.
#[derive(Parser, Debug)]
#[command(name = "pass-proxy", version, about)]
pub struct Cli {
    /// Proxy listen socket [default: 127.0.0.1:7277]
    #[arg(long, env = "PASS_SITE_LISTEN", value_name = "ADDR")]
    pub listen: Option<String>,

    /// Base URL serving the pass-indexer target directory [default: http://127.0.0.1:80/]
    #[arg(long, env = "PASS_SITE_UPSTREAM", value_name = "URL")]
    pub target: Option<String>,

    /// Upstream fetch timeout in seconds, 0 to disable [default: 30]
    #[arg(long, env = "PASS_SITE_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// TOML config file with a [proxy] section
    #[arg(short, long, env = "PASS_SITE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn flags(&self) -> ProxySection {
        ProxySection {
            listen: self.listen.clone(),
            target: self.target.clone(),
            timeout_secs: self.timeout,
        }
    }
}

/// Resolve configuration and serve until interrupted.
pub fn execute(cli: &Cli) -> Result<()> {
    let file = FileConfig::load_optional(cli.config.as_deref())?;
    let config = ProxyConfig::resolve(cli.flags(), file.proxy)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(proxy::serve(config))
}
