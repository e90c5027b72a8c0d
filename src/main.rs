//! csv-cleanse CLI - schema-agnostic CSV cleaner

mod logging;

use clap::Parser;
use csv_cleanse::output::{OutputPaths, write_outputs};
use csv_cleanse::{CleanReport, Cleaner};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Schema-agnostic CSV cleaner.
///
/// Detects name, email, phone, title and date columns, validates and
/// normalizes them, removes duplicates and writes `<name>_clean.csv`,
/// `<name>_clean.json`, `<name>_clean.xlsx` and `<name>_clean.log` for every
/// input file.
#[derive(Parser, Debug)]
#[command(name = "csv-cleanse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV file(s) to clean
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory for output files (default: current directory)
    #[arg(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,

    /// Input field delimiter (single character)
    #[arg(short = 'd', long, default_value = ",")]
    delimiter: char,

    /// Do not write the JSON output
    #[arg(long)]
    no_json: bool,

    /// Do not write the spreadsheet output
    #[arg(long)]
    no_xlsx: bool,

    /// Do not write the rejection log
    #[arg(long)]
    no_log: bool,

    /// Number of files to clean in parallel (default: number of CPUs)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Summary format: text (default) or json
    #[arg(short = 'f', long, default_value = "text")]
    summary: SummaryFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum SummaryFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct FileSummary<'a> {
    file: String,
    kept: usize,
    rejected: usize,
    duplicates: usize,
    logs: usize,
    columns: &'a csv_cleanse::ColumnMap,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(logging::level_from_flags(args.verbose, args.quiet));

    if let Some(jobs) = args.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            tracing::warn!(error = %e, "could not configure thread pool");
        }
    }

    let mut exit_code = ExitCode::SUCCESS;

    let mut cleaner = Cleaner::new();
    if !args.delimiter.is_ascii() {
        eprintln!("Error: delimiter must be a single ASCII character");
        return ExitCode::FAILURE;
    }
    cleaner.delimiter(args.delimiter as u8);

    let mut inputs = Vec::new();
    for file in &args.files {
        if !is_csv(file) {
            eprintln!("Skipped: {}", file.display());
            continue;
        }
        if !file.exists() {
            eprintln!("Not found: {}", file.display());
            exit_code = ExitCode::FAILURE;
            continue;
        }
        inputs.push(file.clone());
    }

    let results = cleaner.clean_paths(&inputs);

    for (file, result) in inputs.iter().zip(results) {
        let outcome = result.and_then(|report| {
            let paths = output_paths(file, &args);
            write_outputs(&report, &paths)?;
            Ok(report)
        });

        match outcome {
            Ok(report) => {
                tracing::info!(file = %file.display(), kept = report.stats.kept, "file cleaned");
                print_summary(file, &report, args.summary);
            }
            Err(e) => {
                eprintln!("Error processing {}: {}", file.display(), e);
                exit_code = ExitCode::FAILURE;
            }
        }
    }

    exit_code
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn output_paths(file: &Path, args: &Args) -> OutputPaths {
    let mut paths = OutputPaths::for_input(file, &args.out_dir);
    if args.no_json {
        paths = paths.without_json();
    }
    if args.no_xlsx {
        paths = paths.without_xlsx();
    }
    if args.no_log {
        paths = paths.without_log();
    }
    paths
}

fn print_summary(file: &Path, report: &CleanReport, format: SummaryFormat) {
    match format {
        SummaryFormat::Text => {
            println!("{} -> {} records", file.display(), report.rows.len());
        }
        SummaryFormat::Json => {
            let summary = FileSummary {
                file: file.display().to_string(),
                kept: report.stats.kept,
                rejected: report.stats.rejected,
                duplicates: report.stats.duplicates,
                logs: report.logs.len(),
                columns: &report.columns,
            };
            match serde_json::to_string(&summary) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("Error writing summary for {}: {}", file.display(), e),
            }
        }
    }
}
