//! Ledger data model.
//!
//! Contains the records the ledger owns: players, their combat tokens,
//! battles, and the moves exchanged inside a battle.

pub mod battle;
pub mod moves;
pub mod player;
pub mod token;

pub use battle::{Battle, BattleStatus, SLOT_COUNT};
pub use moves::{Delta, Move, RoundRecord, STEP};
pub use player::{Player, PlayerId, INITIAL_HEALTH, INITIAL_MANA};
pub use token::{token_uri, Token, MAX_STRENGTH, MAX_VARIANT};
