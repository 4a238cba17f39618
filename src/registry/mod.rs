//! Owned player and battle collections.
//!
//! Registries enforce their own key-level preconditions. Cross-record rules
//! (who may join what, when a round resolves) live in the arena.

pub mod battles;
pub mod players;

pub use battles::BattleRegistry;
pub use players::PlayerRegistry;
