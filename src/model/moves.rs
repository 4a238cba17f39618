//! Moves, per-round resource deltas, and resolved round records.

use serde::{Deserialize, Serialize};

/// Mana cost of attacking and mana gained by defending.
pub const STEP: u32 = 3;

/// A move submitted for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Attack,
    Defend,
}

impl Move {
    /// Returns the wire choice number: 1 for attack, 2 for defend.
    pub const fn choice(self) -> u8 {
        match self {
            Move::Attack => 1,
            Move::Defend => 2,
        }
    }

    /// Parses a wire choice number.
    pub fn from_choice(choice: u8) -> Option<Move> {
        match choice {
            1 => Some(Move::Attack),
            2 => Some(Move::Defend),
            _ => None,
        }
    }
}

/// Signed change to one player's health and mana.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub health: i32,
    pub mana: i32,
}

/// A resolved round, kept in the battle history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Zero-based round number.
    pub round: u32,
    /// Moves indexed by slot.
    pub moves: [Move; 2],
    /// Deltas actually applied, indexed by slot.
    pub deltas: [Delta; 2],
}
