//! ROR Retriever CLI - resolve affiliations to ROR identifiers.

mod cli;
mod logging;
mod run;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));

    let result = logging::init(cli.log_level, cli.log_to.as_deref()).and_then(|()| run::run(&cli));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
