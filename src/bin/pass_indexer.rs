//! pass-indexer - publish a pass password store as static files.

use clap::Parser;

use pass_site::cli::indexer::{self, Cli};
use pass_site::cli::{init_logging, output};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, false, "pass_site=warn");

    if let Err(e) = indexer::execute(&cli) {
        output::error(&e.to_string());
        if let Some(hint) = indexer::hint(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
