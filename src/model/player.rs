//! Player identity and per-player battle resources.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Health every player starts with and returns to after a battle.
pub const INITIAL_HEALTH: u32 = 25;

/// Mana every player starts with and returns to after a battle.
pub const INITIAL_MANA: u32 = 10;

/// Stable, externally supplied participant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        PlayerId(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        PlayerId(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered player.
///
/// Registration is permanent. Health and mana only move during a started
/// battle and snap back to their initial values when the battle ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub health: u32,
    pub mana: u32,
    pub in_battle: bool,
}

impl Player {
    /// Creates a fresh player with full health and mana.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Player {
            id,
            name: name.into(),
            health: INITIAL_HEALTH,
            mana: INITIAL_MANA,
            in_battle: false,
        }
    }

    /// Applies signed deltas, saturating both resources at zero.
    pub(crate) fn apply(&mut self, health_delta: i32, mana_delta: i32) {
        self.health = self.health.saturating_add_signed(health_delta);
        self.mana = self.mana.saturating_add_signed(mana_delta);
    }

    /// Restores the post-battle defaults.
    pub(crate) fn reset(&mut self) {
        self.health = INITIAL_HEALTH;
        self.mana = INITIAL_MANA;
        self.in_battle = false;
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}
