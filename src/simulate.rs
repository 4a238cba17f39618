//! Bot battle simulation.
//!
//! Plays many bot-versus-bot battles against one shared [`Ledger`], in
//! parallel when more than one thread is configured. Each battle registers
//! two fresh players, so battles only contend on the ledger lock.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::arena::Submission;
use crate::config::Config;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::model::{Move, PlayerId, STEP};

#[derive(Debug, Error)]
pub enum SimulateError {
    #[error("ledger rejected a bot operation: {0}")]
    Ledger(#[from] LedgerError),

    #[error("attack bias {0} is not a probability in 0.0-1.0")]
    InvalidBias(f64),

    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of battles to play.
    pub num_battles: usize,
    /// Rounds after which the slot 0 bot quits.
    pub max_rounds: u32,
    /// Probability a bot attacks when it has the mana to.
    pub attack_bias: f64,
    /// Number of worker threads.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_battles: 100,
            max_rounds: 50,
            attack_bias: 0.6,
            threads: 4,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    /// Rejects an attack bias that is not a probability (NaN included).
    pub fn validate(&self) -> Result<(), SimulateError> {
        if (0.0..=1.0).contains(&self.attack_bias) {
            Ok(())
        } else {
            Err(SimulateError::InvalidBias(self.attack_bias))
        }
    }
}

/// Outcome of one simulated battle.
#[derive(Debug, Clone, Serialize)]
pub struct BattleSummary {
    pub battle: String,
    pub rounds: u32,
    pub winner: Option<PlayerId>,
    /// Slot of the winner, if any.
    pub winner_slot: Option<usize>,
    /// True when the round cap forced a quit.
    pub timed_out: bool,
    pub attacks: u32,
}

/// Picks a move: attack with probability `attack_bias` when affordable.
fn bot_move(mana: u32, attack_bias: f64, rng: &mut SmallRng) -> Move {
    if mana >= STEP && rng.gen_bool(attack_bias) {
        Move::Attack
    } else {
        Move::Defend
    }
}

/// Plays one battle to completion.
pub fn play_battle(
    ledger: &Ledger,
    config: &SimulationConfig,
    battle_id: usize,
    rng: &mut SmallRng,
) -> Result<BattleSummary, SimulateError> {
    config.validate()?;
    let name = format!("sim-{battle_id}");
    let ids = [
        PlayerId::new(format!("sim-{battle_id}-a")),
        PlayerId::new(format!("sim-{battle_id}-b")),
    ];
    for (i, id) in ids.iter().enumerate() {
        ledger.register_player(id.clone(), &format!("Bot{i}"), &format!("Blade{i}"))?;
    }
    ledger.create_battle(&ids[0], &name)?;
    ledger.join_battle(&ids[1], &name)?;

    let mut attacks = 0;
    for round in 0..config.max_rounds {
        let mut outcome = Submission::Waiting;
        for id in &ids {
            let mana = ledger.get_player(id)?.mana;
            let mv = bot_move(mana, config.attack_bias, rng);
            if mv == Move::Attack {
                attacks += 1;
            }
            outcome = ledger.attack_or_defend_choice(id, mv, &name)?;
        }
        if let Submission::Ended { winner, .. } = outcome {
            debug!(battle = %name, rounds = round + 1, "simulated battle decided");
            return Ok(BattleSummary {
                winner_slot: winner.as_ref().and_then(|w| ids.iter().position(|id| id == w)),
                battle: name,
                rounds: round + 1,
                winner,
                timed_out: false,
                attacks,
            });
        }
    }

    let battle = ledger.quit_battle(&ids[0], &name)?;
    Ok(BattleSummary {
        battle: name,
        rounds: config.max_rounds,
        winner: battle.winner,
        winner_slot: Some(1),
        timed_out: true,
        attacks,
    })
}

fn battle_rng(seed: u64, battle_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(battle_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Runs the configured number of battles and returns their summaries in
/// battle order, along with the ledger they were played on.
pub fn run_simulation(
    config: &SimulationConfig,
) -> Result<(Ledger, Vec<BattleSummary>), SimulateError> {
    config.validate()?;
    let ledger = Ledger::new(&Config {
        seed: config.seed,
        ..Config::default()
    });

    let summaries = if config.threads > 1 {
        run_parallel(&ledger, config)?
    } else {
        (0..config.num_battles)
            .map(|i| play_battle(&ledger, config, i, &mut battle_rng(config.seed, i)))
            .collect::<Result<Vec<_>, _>>()?
    };
    Ok((ledger, summaries))
}

fn run_parallel(
    ledger: &Ledger,
    config: &SimulationConfig,
) -> Result<Vec<BattleSummary>, SimulateError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let completed = AtomicUsize::new(0);

    pool.install(|| {
        (0..config.num_battles)
            .into_par_iter()
            .map(|i| {
                let summary = play_battle(ledger, config, i, &mut battle_rng(config.seed, i));
                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(completed = n, total = config.num_battles, "battle finished");
                summary
            })
            .collect()
    })
}

/// Writes summaries as JSONL, one battle per line.
pub fn write_jsonl<W: Write>(summaries: &[BattleSummary], out: &mut W) -> std::io::Result<()> {
    for summary in summaries {
        serde_json::to_writer(&mut *out, summary)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints aggregate results to stderr.
pub fn print_summary(summaries: &[BattleSummary]) {
    let total = summaries.len();
    let mut slot_wins = [0usize; 2];
    let mut draws = 0usize;
    let mut timeouts = 0usize;
    let mut rounds = 0u64;

    for s in summaries {
        rounds += s.rounds as u64;
        if s.timed_out {
            timeouts += 1;
        }
        match s.winner_slot {
            Some(slot) => slot_wins[slot] += 1,
            None => draws += 1,
        }
    }

    eprintln!("=== Simulation Summary ===");
    eprintln!("Battles: {}", total);
    eprintln!("Avg rounds/battle: {:.1}", rounds as f64 / total.max(1) as f64);
    eprintln!("Creator wins: {}", slot_wins[0]);
    eprintln!("Joiner wins: {}", slot_wins[1]);
    eprintln!("Draws: {}", draws);
    eprintln!("Round-cap quits: {}", timeouts);
}
