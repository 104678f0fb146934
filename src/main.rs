//! minic CLI entry point

use clap::Parser;
use tracing_subscriber::EnvFilter;

use minic::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize structured logging with env-based filter; `--debug` raises the default from warn to trace
    let default_filter = if cli.debug { "trace" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .try_init();

    cli::run(cli);
}
