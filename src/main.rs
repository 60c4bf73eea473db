use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::TimeDelta;
use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use docverify::core::model::AnalysisOutcome;
use docverify::pipeline::{default_models_dir, ForgeryDetector, PipelineConfig};
use docverify::VerifyError;

#[derive(Parser, Debug)]
#[command(name = "docverify")]
#[command(version, about = "Screen a medical record image for signs of forgery", long_about = None)]
struct Cli {
    /// Image file to analyze (exactly one)
    images: Vec<PathBuf>,

    /// Directory holding the model and scaler artifacts
    #[arg(long, env = "DOCVERIFY_MODELS_DIR")]
    models_dir: Option<PathBuf>,

    /// Also keep a JSON record of each completed analysis here
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Delete saved records older than this many days after each save
    #[arg(long, requires = "save_dir", value_parser = clap::value_parser!(u32).range(1..=36500))]
    retention_days: Option<u32>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log pipeline stages to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => return report_failure(VerifyError::Argument, false),
        },
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(err, cli.pretty),
    }
}

fn run(cli: &Cli) -> Result<(), VerifyError> {
    let [image] = cli.images.as_slice() else {
        return Err(VerifyError::Argument);
    };
    if !image.exists() {
        return Err(VerifyError::FileNotFound(image.clone()));
    }

    let models_dir = cli.models_dir.clone().unwrap_or_else(default_models_dir);
    let config = PipelineConfig::new(models_dir)
        .with_save_dir(cli.save_dir.clone())
        .with_retention(cli.retention_days.map(|days| TimeDelta::days(i64::from(days))));

    let outcome = match ForgeryDetector::from_config(&config) {
        Ok(detector) => detector.analyze_document(image),
        Err(err) => AnalysisOutcome::Failed(VerifyError::from(err).to_payload()),
    };

    print_json(&outcome, cli.pretty)?;
    Ok(())
}

/// Print the error payload; only argument and missing-file errors exit 1.
fn report_failure(err: VerifyError, pretty: bool) -> ExitCode {
    if let Err(print_err) = print_json(&err.to_payload(), pretty) {
        let _ = writeln!(io::stderr(), "{print_err}");
    }
    if err.is_fatal() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), VerifyError> {
    write_json(&mut io::stdout().lock(), value, pretty)
}

/// A closed or failing writer is reported as an error, never a panic.
fn write_json<W: Write, T: Serialize>(
    out: &mut W,
    value: &T,
    pretty: bool,
) -> Result<(), VerifyError> {
    let data = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;
    writeln!(out, "{data}")
        .and_then(|()| out.flush())
        .context("failed to write output")?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
