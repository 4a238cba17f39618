//! Bot battle simulation CLI.
//!
//! Plays bot-versus-bot battles against one shared ledger and writes one
//! JSON summary per battle.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use neonwarriors::simulate::{self, SimulationConfig};

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Play bot battles against a shared NeonWarriors ledger", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of battles to play
    #[arg(long, default_value = "100")]
    battles: usize,

    /// Rounds before the creator bot quits
    #[arg(long, default_value = "50")]
    max_rounds: u32,

    /// Probability a bot attacks when it can afford to (0.0-1.0)
    #[arg(long, default_value = "0.6", value_parser = parse_bias)]
    attack_bias: f64,

    /// Number of parallel threads
    #[arg(long, default_value = "4")]
    threads: usize,

    /// Random seed, 0 for entropy
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Suppress summary output
    #[arg(short, long)]
    quiet: bool,
}

fn parse_bias(raw: &str) -> Result<f64, String> {
    let bias: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&bias) {
        Ok(bias)
    } else {
        Err(format!("{raw} is not a probability in 0.0-1.0"))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SimulationConfig {
        num_battles: cli.battles,
        max_rounds: cli.max_rounds.max(1),
        attack_bias: cli.attack_bias,
        threads: cli.threads.max(1),
        seed: cli.seed,
    };

    let start = Instant::now();
    let summaries = match simulate::run_simulation(&config) {
        Ok((_, summaries)) => summaries,
        Err(e) => {
            error!(error = %e, "simulation failed");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();
    info!(battles = summaries.len(), secs = elapsed.as_secs_f64(), "simulation complete");

    if !cli.quiet {
        eprintln!(
            "Completed {} battles in {:.2}s on {} threads",
            summaries.len(),
            elapsed.as_secs_f64(),
            config.threads
        );
        simulate::print_summary(&summaries);
    }

    let written = match &cli.output {
        Some(path) => File::create(path)
            .and_then(|file| simulate::write_jsonl(&summaries, &mut BufWriter::new(file))),
        None => simulate::write_jsonl(&summaries, &mut BufWriter::new(io::stdout().lock())),
    };
    if let Err(e) = written {
        error!(error = %e, "failed to write output");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
