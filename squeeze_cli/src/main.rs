use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use squeeze_codecs::{codec_by_name, codec_for_path};
use squeeze_core::{
    CompressionResult, SearchObserver, SizeBudget, TargetSearch, TrialOutcome,
    DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_QUALITY, DEFAULT_MIN_QUALITY, DEFAULT_TOLERANCE,
};

mod size;

use size::{human_bytes, parse_size};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "squeeze",
    about = "Squeeze a document down to a target file size by searching codec quality levels",
    version
)]
struct Cli {
    /// Source document (PDF or JPEG)
    input: PathBuf,
    /// Destination path; an existing directory keeps the input file name
    output: PathBuf,
    /// Desired maximum size (e.g. 500KB, 1.5MB)
    #[arg(long, value_parser = parse_size)]
    target: u64,
    /// Acceptable overshoot above the target, as a fraction
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
    /// Lower bound for codec quality used during compression
    #[arg(long, default_value_t = DEFAULT_MIN_QUALITY)]
    min_quality: u8,
    /// Upper bound for codec quality used during compression
    #[arg(long, default_value_t = DEFAULT_MAX_QUALITY)]
    max_quality: u8,
    /// Cap on recompression trials
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: u32,
    /// Codec to use: pdf | jpeg (default: picked from the input extension)
    #[arg(long)]
    codec: Option<String>,
    /// Print the result record to stdout as JSON
    #[arg(long)]
    json: bool,
}

// ── progress reporting ─────────────────────────────────────────────────────

/// Prints one stderr line per codec trial.
struct TrialPrinter {
    max_iterations: u32,
}

impl SearchObserver for TrialPrinter {
    fn on_trial(&mut self, trial: &TrialOutcome) {
        let verdict = if trial.within_ceiling {
            "within ceiling"
        } else {
            "over ceiling"
        };
        eprintln!(
            "  trial {}/{}   : quality {:>3} → {} ({})",
            trial.iteration,
            self.max_iterations,
            trial.quality,
            human_bytes(trial.size_bytes),
            verdict
        );
    }
}

// ── run ────────────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> anyhow::Result<CompressionResult> {
    let budget = SizeBudget::new(
        cli.target,
        cli.tolerance,
        cli.min_quality,
        cli.max_quality,
        cli.max_iterations,
    )?;

    let codec = match &cli.codec {
        Some(name) => codec_by_name(name)?,
        None => codec_for_path(&cli.input)?,
    };

    let mut output = cli.output.clone();
    if output.is_dir() {
        let name = cli
            .input
            .file_name()
            .context("input path has no file name")?;
        output = output.join(name);
    }
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {:?}", parent))?;
        }
    }

    eprintln!("  codec       : {}", codec.name());
    eprintln!("  target      : {}", human_bytes(budget.target_bytes()));

    let mut printer = TrialPrinter {
        max_iterations: cli.max_iterations,
    };
    let result = TargetSearch::new(&budget, codec.as_ref()).run(&cli.input, &output, &mut printer)?;

    eprintln!("  final size  : {}", human_bytes(result.final_size_bytes));
    eprintln!("  output      : {:?}", result.output_path);

    if cli.json {
        println!("{}", serde_json::to_string(&result)?);
    }
    if !result.reached_target {
        eprintln!(
            "warning: could not get below {}; wrote the closest candidate instead",
            human_bytes(budget.target_bytes())
        );
    }
    Ok(result)
}

// ── entry point ────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(result) if result.reached_target => ExitCode::SUCCESS,
        // Usable output, but above the exact target: degraded, non-fatal.
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
