//! pymodule CLI
//!
//! Collects configuration from defaults, the configuration file, the
//! environment and the command line, then either prints version
//! information or runs the application.

use clap::Parser;
use pymodule::{CliOptions, LogCapture, get_app_configuration, init_logging, run_app};
use std::process;
use tracing::info;

fn main() {
    let cli = CliOptions::parse();

    // Verbosity is only known once every layer is merged, so events from
    // loading are held back and replayed after the subscriber is installed.
    let early = LogCapture::new();
    let loaded = tracing::subscriber::with_default(
        early.subscriber(tracing::Level::INFO),
        || get_app_configuration(&cli),
    );

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprint!("{}", early.logs());
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(cfg.config.logging.verbose, None) {
        eprintln!("Warning: {}", e);
    }
    eprint!("{}", early.logs());

    if cfg.config.logging.version_option {
        info!("Version information requested");
        println!("pymodule {}", env!("CARGO_PKG_VERSION"));
    } else {
        run_app(&cfg.config);
    }
}
