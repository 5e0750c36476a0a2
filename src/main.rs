//! `pilot` - env file management CLI entry point.

use std::process;

use clap::Parser;
use envpilot::{cli::Cli, tracing_config};

fn main() {
    if let Err(e) = tracing_config::init() {
        eprintln!("failed to initialize logging: {e}");
    }

    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
