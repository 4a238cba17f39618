//! Battle records and their status.

use serde::{Deserialize, Serialize};

use super::moves::{Move, RoundRecord};
use super::player::PlayerId;

/// Number of participant slots in a battle.
pub const SLOT_COUNT: usize = 2;

/// Lifecycle status of a battle. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BattleStatus {
    Pending,
    Started,
    Ended,
}

/// A named battle between two slots.
///
/// Slot 0 is the creator, slot 1 the joiner. Pending moves are not
/// serialized so an opponent cannot read a move before the round resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    pub name: String,
    pub status: BattleStatus,
    pub players: [Option<PlayerId>; SLOT_COUNT],
    pub winner: Option<PlayerId>,
    /// Number of rounds resolved so far.
    pub round: u32,
    pub history: Vec<RoundRecord>,
    #[serde(skip)]
    pub(crate) pending: [Option<Move>; SLOT_COUNT],
}

impl Battle {
    /// Creates a pending battle with `creator` in slot 0.
    pub fn new(name: impl Into<String>, creator: PlayerId) -> Self {
        Battle {
            name: name.into(),
            status: BattleStatus::Pending,
            players: [Some(creator), None],
            winner: None,
            round: 0,
            history: Vec::new(),
            pending: [None; SLOT_COUNT],
        }
    }

    /// Returns the slot `id` occupies, if any.
    pub fn slot_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.as_ref() == Some(id))
    }

    /// Returns the participant in the slot opposite `slot`.
    pub fn opponent(&self, slot: usize) -> Option<&PlayerId> {
        self.players[1 - slot].as_ref()
    }

    pub fn creator(&self) -> Option<&PlayerId> {
        self.players[0].as_ref()
    }

    /// Returns both participants once the second slot is filled.
    pub fn participants(&self) -> Option<[&PlayerId; SLOT_COUNT]> {
        match &self.players {
            [Some(a), Some(b)] => Some([a, b]),
            _ => None,
        }
    }

    /// Returns true if `slot` has submitted a move in the open round.
    pub fn has_moved(&self, slot: usize) -> bool {
        self.pending[slot].is_some()
    }

    /// Returns both pending moves once every slot has submitted.
    pub(crate) fn ready_moves(&self) -> Option<[Move; SLOT_COUNT]> {
        match self.pending {
            [Some(a), Some(b)] => Some([a, b]),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BattleStatus::Started
    }
}
