//! NeonWarriors battle engine library.
//!
//! Exposes the ledger data model, registries, round resolver, battle
//! lifecycle, and the text protocol for use by integration tests and the
//! binary entry points.

pub mod arena;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod model;
pub mod protocol;
pub mod registry;
pub mod resolve;
pub mod roll;
pub mod simulate;

pub use arena::{Arena, Submission};
pub use config::Config;
pub use error::LedgerError;
pub use ledger::Ledger;
