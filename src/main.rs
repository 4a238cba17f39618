//! NeonWarriors battle engine.
//!
//! Reads ledger commands from stdin, one per line, and writes one reply line
//! per command to stdout. Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use neonwarriors::config::Config;
use neonwarriors::engine::{Engine, Flow};

#[derive(Parser, Debug)]
#[command(name = "neonwarriors")]
#[command(about = "Turn-based PvP battle ledger over a line protocol", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URI for token metadata (overrides NEON_METADATA_URI)
    #[arg(long, value_name = "URI")]
    metadata_uri: Option<String>,

    /// Seed for token stat rolls, 0 for OS entropy (overrides NEON_SEED)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(uri) = cli.metadata_uri {
        config.metadata_uri = uri;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "i/o failure");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> io::Result<()> {
    info!(metadata_uri = %config.metadata_uri, seeded = config.seed != 0, "engine ready");
    let engine = Engine::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = line?;
        if engine.handle_line(&line, &mut out)? == Flow::Exit {
            break;
        }
    }
    out.flush()
}
