use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use abreport_core::error::AbReportError;
use abreport_core::parser::{parse_report, parse_report_file};
use abreport_core::report::export::{csv_header, csv_row, export_json};

#[derive(Debug, Parser)]
#[command(name = "abreport")]
#[command(about = "Summarize an ApacheBench report as one CSV row")]
struct Cli {
    /// Optional name of the test run, placed in the first CSV column.
    #[arg(short, long, default_value = "")]
    name: String,

    /// Print the CSV header row before the data row.
    #[arg(long)]
    header: bool,

    /// Print only the CSV header row and exit without reading a report.
    #[arg(long)]
    header_only: bool,

    /// Print the full parsed record as pretty JSON instead of a CSV row.
    #[arg(long)]
    json: bool,

    /// Report file to parse; reads stdin when omitted.
    file: Option<PathBuf>,
}

fn main() {
    // Diagnostics go to stderr so stdout stays clean for the CSV.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AbReportError> {
    if cli.header_only {
        println!("{}", csv_header());
        return Ok(());
    }

    let outcome = match &cli.file {
        Some(path) => parse_report_file(path)?,
        None => parse_report(io::stdin().lock()),
    };

    if cli.json {
        println!("{}", export_json(&outcome.report)?);
        return Ok(());
    }

    if cli.header {
        println!("{}", csv_header());
    }
    println!("{}", csv_row(&outcome.report, &cli.name));
    Ok(())
}
