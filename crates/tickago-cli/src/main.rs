//! tickago CLI
//!
//! Relative time strings and calendar differences from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tickago::{Instant, Labels};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tickago", version)]
#[command(about = "Calendar-aware date differences and relative time strings", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Describe a timestamp relative to now ("3 days ago", "in 2 hours")
    Ago(AgoArgs),
    /// Print the calendar difference between two dates as JSON
    Compare(CompareArgs),
}

#[derive(Debug, Args)]
struct AgoArgs {
    /// Date string, or epoch milliseconds (all digits, optionally negative)
    #[arg(allow_negative_numbers = true)]
    timestamp: String,

    /// Reference time instead of the system clock
    #[arg(long, allow_negative_numbers = true)]
    now: Option<String>,

    /// Field pattern for the dates, e.g. DD/MM/YYYY
    #[arg(long)]
    format: Option<String>,

    /// JSON file with label overrides (past, future, now, units, plural)
    #[arg(long)]
    labels: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CompareArgs {
    /// Date string, or epoch milliseconds (all digits, optionally negative)
    #[arg(allow_negative_numbers = true)]
    date1: String,
    #[arg(allow_negative_numbers = true)]
    date2: String,

    /// Field pattern for the dates, e.g. DD/MM/YYYY
    #[arg(long)]
    format: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Ago(args) => run_ago(args),
        Commands::Compare(args) => run_compare(args),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "tickago=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_ago(args: AgoArgs) -> Result<String> {
    let labels = match &args.labels {
        Some(path) => load_labels(path)?,
        None => Labels::new(),
    };
    let format = args.format.as_deref();

    let now = match &args.now {
        Some(now) => parse(now, format).context("invalid --now")?,
        None => Instant::now(),
    };
    let timestamp = parse(&args.timestamp, format)?;
    debug!(now = %now.as_datetime(), timestamp = %timestamp.as_datetime(), "describing timestamp");

    Ok(tickago::moment_at(now, timestamp, &labels)?)
}

fn run_compare(args: CompareArgs) -> Result<String> {
    let format = args.format.as_deref();
    let a = parse(&args.date1, format)?;
    let b = parse(&args.date2, format)?;
    debug!(date1 = %a.as_datetime(), date2 = %b.as_datetime(), "comparing dates");
    let diff = tickago::compare_instants(&a, &b);

    let json = if args.pretty {
        serde_json::to_string_pretty(&diff)?
    } else {
        serde_json::to_string(&diff)?
    };
    Ok(json)
}

/// Without a field pattern, all-digit arguments (optionally signed) are
/// epoch milliseconds, so a bare `2024` is 2024ms after the epoch rather
/// than a year. Pass `--format YYYY` to read it as a year.
fn parse(arg: &str, format: Option<&str>) -> Result<Instant> {
    let instant = match (format, arg.trim().parse::<i64>()) {
        (Some(format), _) => tickago::parse_date_with_format(arg, format)?,
        (None, Ok(millis)) => tickago::parse_date(millis)?,
        (None, Err(_)) => tickago::parse_date(arg)?,
    };
    Ok(instant)
}

fn load_labels(path: &Path) -> Result<Labels> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read labels file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("labels file {} is not valid JSON", path.display()))?;
    Ok(Labels::from_json(&value)?)
}
