//! ISeeFortune verifier binary
//!
//! Run: `iseefortune-verifier verify --slot 432863999 --blockhash <base58> --debug`

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use iseefortune_rng::{
    load_vectors, run_vectors, verify_text, Config, ErrorReport, Range, Report, TextReport,
    VerifyError, DEFAULT_RANGE,
};
use std::{path::PathBuf, process::ExitCode};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "iseefortune-verifier")]
#[command(version, about = "Verify ISeeFortune winning number from slot + Solana blockhash")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompute the winning number for one slot and blockhash
    Verify(VerifyArgs),
    /// Check every vector in a test-vector file
    Vectors(VectorsArgs),
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Slot used in RNG (decimal u64)
    #[arg(long, allow_hyphen_values = true)]
    slot: String,

    /// Solana blockhash (base58)
    #[arg(long)]
    blockhash: String,

    /// Output range [default: 10, or ISEEFORTUNE_RANGE]
    #[arg(long, allow_hyphen_values = true)]
    range: Option<String>,

    /// Include the digest and its byte sum
    #[arg(long)]
    debug: bool,

    /// Include every intermediate value
    #[arg(long)]
    full_trace: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Args, Debug)]
struct VectorsArgs {
    /// Vector file [default: vectors/vectors.json, or ISEEFORTUNE_VECTORS]
    #[arg(long)]
    file: Option<PathBuf>,

    /// Output range [default: 10, or ISEEFORTUNE_RANGE]
    #[arg(long, allow_hyphen_values = true)]
    range: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env();

    if let Err(e) = init_tracing(&config.log_filter) {
        eprintln!("warning: logging disabled: {e}");
    }

    let outcome = match cli.command {
        Command::Verify(args) => run_verify(args, &config),
        Command::Vectors(args) => run_vectors_file(args, &config),
    };

    outcome.unwrap_or_else(|e| {
        eprintln!("error: {e:#}");
        ExitCode::FAILURE
    })
}

/// Logs go to stderr so stdout stays machine-readable
fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;
    let subscriber =
        FmtSubscriber::builder().with_env_filter(filter).with_writer(std::io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run_verify(args: VerifyArgs, config: &Config) -> Result<ExitCode> {
    let range = args
        .range
        .or_else(|| config.range.clone())
        .unwrap_or_else(|| DEFAULT_RANGE.to_string());

    let result = match verify_text(&args.slot, &args.blockhash, &range) {
        Ok(result) => result,
        Err(e) => return Ok(report_error(&e, args.format)),
    };

    match args.format {
        Format::Json => {
            let report = Report::new(&result, args.debug, args.full_trace);
            println!("{}", report.to_json_pretty().context("failed to serialize report")?);
        }
        Format::Text => {
            println!("{}", TextReport::new(&result, args.debug || args.full_trace));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn report_error(err: &VerifyError, format: Format) -> ExitCode {
    match format {
        Format::Json => match serde_json::to_string_pretty(&ErrorReport::from(err)) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("error: {err}"),
        },
        Format::Text => eprintln!("error: {err}"),
    }
    ExitCode::FAILURE
}

fn run_vectors_file(args: VectorsArgs, config: &Config) -> Result<ExitCode> {
    let range = match args.range.as_deref() {
        Some(text) => Range::parse(text)?,
        None => config.range()?,
    };
    let path = args.file.unwrap_or_else(|| config.vectors_path.clone());

    let vectors =
        load_vectors(&path).with_context(|| format!("failed to load {}", path.display()))?;
    info!(count = vectors.len(), %range, "checking test vectors");

    let report = run_vectors(&vectors, range);
    for outcome in report.failures() {
        if let Err(e) = &outcome.result {
            eprintln!("FAIL {}: {e}", outcome.name);
        }
    }

    let passed = report.into_result()?;
    println!("OK: {passed} vector(s) passed");
    Ok(ExitCode::SUCCESS)
}
