//! Agora CLI - Command-line interface for the AGORA voting ledger.
//!
//! Drives a JSON-persisted quadratic voting ledger from the command line.

pub mod commands;
pub mod store;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = commands::Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = commands::execute(&cli) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
