//! Combat tokens minted at registration.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Fixed total of a token's attack and defense strengths.
pub const MAX_STRENGTH: u8 = 10;

/// Highest token variant identifier.
pub const MAX_VARIANT: u8 = 5;

/// A player's combat token. Immutable once minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub owner: PlayerId,
    pub name: String,
    pub variant: u8,
    pub attack: u8,
    pub defense: u8,
}

/// Returns the metadata URI for a token variant: `<base>/<variant>.json`.
///
/// A trailing slash on `base` is not doubled.
pub fn token_uri(base: &str, variant: u8) -> String {
    format!("{}/{}.json", base.trim_end_matches('/'), variant)
}
