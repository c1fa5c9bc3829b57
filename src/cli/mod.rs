//! Command-line interface.
//!
//! One module per binary: `indexer` for `pass-indexer`, `proxy` for
//! `pass-proxy`.

pub mod indexer;
pub mod output;
pub mod proxy;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a tracing filter, e.g. `pass_site=trace`.
pub const LOG_ENV: &str = "PASS_SITE_LOG";

/// Install the tracing subscriber.
///
/// `PASS_SITE_LOG` wins when set; otherwise `--verbose` selects debug
/// output and `quiet_filter` applies.
pub fn init_logging(verbose: bool, json: bool, quiet_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("pass_site=debug,tower_http=debug")
        } else {
            EnvFilter::new(quiet_filter)
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
