//! The retrieval run: load inputs, resolve, report.

use std::io;

use chrono::Local;
use colored::Colorize;
use ror_retriever::{AffiliationClient, Retriever, RorClient, RunSummary, output_file_name};
use tracing::debug;

use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let records = cli.source().load()?;

    let client = RorClient::with_config(cli.client_config())?;
    debug!("Using {} client at {}", client.name(), client.config().base_url);

    let output = cli
        .output_dir
        .join(output_file_name(Local::now().naive_local()));

    let retriever = Retriever::with_config(client, cli.retriever_config());
    let summary = retriever.run(&records, &output, &mut io::stdout().lock())?;

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!(
        "{} {} affiliations ({} skipped, {} failed)",
        "Processed".cyan().bold(),
        summary.inputs.to_string().white().bold(),
        summary.skipped.to_string().yellow(),
        if summary.failed > 0 {
            summary.failed.to_string().red()
        } else {
            summary.failed.to_string().normal()
        }
    );
    println!(
        "Found {} RORs in {} rows",
        summary.accepted.to_string().green().bold(),
        summary.rows.to_string().white()
    );
    println!(
        "{} {}",
        "Saved to".green().bold(),
        summary.output.display().to_string().white()
    );
}
