//! pass-proxy - legacy client shim for a published pass-site.

use clap::Parser;

use pass_site::cli::proxy::{self, Cli};
use pass_site::cli::{init_logging, output};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json, "pass_site=info,tower_http=info");

    if let Err(e) = proxy::execute(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
