//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use fleetside_cli::CliError;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    if let Err(err) = fleetside_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = err {
            clap_err.exit();
        }
        eprintln!("fleetside: {err}");
        std::process::exit(1);
    }
}

/// Send `log` records to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("fleetside: failed to initialise logging: {err}");
    }
}
