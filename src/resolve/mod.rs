//! Round resolution.
//!
//! Turns two simultaneously submitted moves into per-slot resource deltas.
//! Everything here is pure; the arena applies the result.

pub mod turn;

pub use turn::{damage, resolve_round, Fighter};
