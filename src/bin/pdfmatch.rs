use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pdf_match_extract::{PagePolicy, ScanOptions, ScanReport, WriteErrorPolicy, scan_folder};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pdfmatch",
    version,
    about = "Scan a folder of PDFs for a pattern and export the matches"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan a source folder; write per-match PDFs and a summary CSV.
    Scan(ScanArgs),
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// Source folder containing PDF files.
    #[arg(short, long)]
    source: PathBuf,

    /// Regular expression applied to each document's concatenated text.
    #[arg(short, long)]
    pattern: String,

    /// Destination folder for derived PDFs and the summary CSV. Created if
    /// missing.
    #[arg(short, long)]
    dest: PathBuf,

    /// Summary CSV delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Minimum cells required per candidate table row.
    #[arg(long, default_value_t = 2)]
    min_cols: usize,

    /// Copy the page each match occurs on instead of the first page.
    #[arg(long)]
    match_page: bool,

    /// Abort the whole run when a derived PDF cannot be written.
    #[arg(long)]
    abort_on_write_error: bool,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(args: &ScanArgs) -> Result<ScanOptions> {
    if !args.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }

    Ok(ScanOptions {
        delimiter: args.delimiter as u8,
        min_cols: args.min_cols,
        page_policy: if args.match_page {
            PagePolicy::MatchPage
        } else {
            PagePolicy::FirstPage
        },
        write_error_policy: if args.abort_on_write_error {
            WriteErrorPolicy::Abort
        } else {
            WriteErrorPolicy::Skip
        },
    })
}

fn print_report(report: &ScanReport) {
    for file in &report.files {
        println!("{}: {} match(es)", file.filename, file.matches.len());
        for record in &file.matches {
            println!("  {}", record.text);
        }
    }
    println!(
        "{} file(s) processed, {} match(es) total",
        report.files.len(),
        report.match_count()
    );
}

fn log_warnings(report: &ScanReport, verbose: bool) {
    if report.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!(
                "  - {:?} file={:?} page={:?}: {}",
                warning.code, warning.filename, warning.page, warning.message
            );
        }
    }
}

fn run_scan(args: &ScanArgs) -> Result<ScanReport> {
    let options = parse_options(args)?;
    scan_folder(&args.source, &args.pattern, &args.dest, &options)
        .with_context(|| format!("failed to scan '{}'", args.source.display()))
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pdf_match_extract=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan(args) => match run_scan(&args) {
            Ok(report) => {
                log_warnings(&report, args.verbose);
                print_report(&report);
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
