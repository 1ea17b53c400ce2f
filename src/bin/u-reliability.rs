//! u-reliability CLI
//!
//! Terminal front end for the exponential reliability model.
//!
//! # Commands
//!
//! - `evaluate`: reliability at one time, optionally saved as text or table
//! - `curve`: sampled curve over [0, 5·MTBF], saved as table, JSON or SVG
//!
//! Exit code 2 on invalid input, 1 on any other failure.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use u_reliability::config::Settings;
use u_reliability::exponential::{build_curve, HORIZON_MULTIPLE};
use u_reliability::input::{parse_mtbf, parse_time};
use u_reliability::plot::write_svg;
use u_reliability::report::{
    curve_records, format_value, render_table, summary_sentence, write_curve_json,
    write_tabular_record, write_text_record, ReliabilityRecord,
};
use u_reliability::ReliabilityError;

/// Exponential reliability calculator: R(t) = exp(-t / MTBF)
#[derive(Parser)]
#[command(name = "u-reliability")]
#[command(version)]
#[command(about = "Exponential reliability calculator: R(t) = exp(-t / MTBF)")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML settings file with default values and plot style
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reliability at a single time
    Evaluate(EvaluateArgs),
    /// Sampled reliability curve over [0, 5·MTBF]
    Curve(CurveArgs),
}

#[derive(Args)]
struct EvaluateArgs {
    /// Mean time between failures (hours)
    #[arg(short, long, value_parser = parse_mtbf)]
    mtbf: Option<f64>,

    /// Time at which to evaluate reliability (hours)
    #[arg(short, long, value_parser = parse_time)]
    time: Option<f64>,

    /// Save the result sentence to this file
    #[arg(long)]
    text: Option<PathBuf>,

    /// Save the result as a `Time (h), MTBF (h), Reliability (%)` table
    #[arg(long)]
    table: Option<PathBuf>,
}

#[derive(Args)]
struct CurveArgs {
    /// Mean time between failures (hours)
    #[arg(short, long, value_parser = parse_mtbf)]
    mtbf: Option<f64>,

    /// Number of samples (at least 2)
    #[arg(short, long)]
    samples: Option<usize>,

    /// Print every sample as a table
    #[arg(long)]
    print: bool,

    /// Save the samples as a `Time (h), MTBF (h), Reliability (%)` table
    #[arg(long)]
    table: Option<PathBuf>,

    /// Save the curve as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Save the curve as an SVG plot
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn missing(name: &'static str, reason: &'static str) -> ReliabilityError {
    ReliabilityError::InvalidParameter {
        name,
        value: "(missing)".to_string(),
        reason,
    }
}

/// Command-line MTBF, else the settings default.
fn resolve_mtbf(arg: Option<f64>, settings: &Settings) -> Result<f64, ReliabilityError> {
    arg.or(settings.mtbf)
        .ok_or_else(|| missing("mtbf", "pass --mtbf or set `mtbf` in the config file"))
}

/// Command-line time, else the settings default.
fn resolve_time(arg: Option<f64>, settings: &Settings) -> Result<f64, ReliabilityError> {
    arg.or(settings.time)
        .ok_or_else(|| missing("t", "pass --time or set `time` in the config file"))
}

/// 2 when the chain carries an invalid parameter, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    let invalid_input = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<ReliabilityError>())
        .any(ReliabilityError::is_invalid_parameter);
    if invalid_input {
        2
    } else {
        1
    }
}

fn evaluate(args: EvaluateArgs, settings: &Settings) -> anyhow::Result<()> {
    let mtbf = resolve_mtbf(args.mtbf, settings)?;
    let time = resolve_time(args.time, settings)?;

    let record = ReliabilityRecord::evaluate(time, mtbf)?;
    debug!(time, mtbf, reliability = record.reliability, "evaluated");

    println!("{}", summary_sentence(&record));
    println!("{}", render_table(&[record]));

    if let Some(path) = args.text {
        write_text_record(&path, &record)
            .with_context(|| format!("saving result to {}", path.display()))?;
    }
    if let Some(path) = args.table {
        write_tabular_record(&path, &[record])
            .with_context(|| format!("saving table to {}", path.display()))?;
    }
    Ok(())
}

fn curve(args: CurveArgs, settings: &Settings) -> anyhow::Result<()> {
    let mtbf = resolve_mtbf(args.mtbf, settings)?;
    let samples = args.samples.unwrap_or(settings.sample_count);

    let curve = build_curve(mtbf, samples)?;
    info!(mtbf, samples, "built curve");

    if let Some(last) = curve.last() {
        println!(
            "{} samples over [0, {}] (= {}·MTBF), R at horizon = {:.6}",
            curve.len(),
            format_value(last.time),
            HORIZON_MULTIPLE,
            last.reliability
        );
    }
    if args.print {
        println!("{}", render_table(&curve_records(&curve)));
    }

    if let Some(path) = args.table {
        write_tabular_record(&path, &curve_records(&curve))
            .with_context(|| format!("saving table to {}", path.display()))?;
    }
    if let Some(path) = args.json {
        write_curve_json(&path, &curve)
            .with_context(|| format!("saving curve to {}", path.display()))?;
    }
    if let Some(path) = args.svg {
        write_svg(&path, &curve, &settings.plot)
            .with_context(|| format!("saving plot to {}", path.display()))?;
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Evaluate(args) => evaluate(args, &settings),
        Commands::Curve(args) => curve(args, &settings),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}
