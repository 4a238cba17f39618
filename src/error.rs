//! Ledger error taxonomy.
//!
//! Every rejected operation maps to exactly one variant. None of them are
//! transient: the caller has to change the request before retrying.

use thiserror::Error;

use crate::model::PlayerId;

/// Errors returned by ledger operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("player '{0}' already registered")]
    AlreadyRegistered(PlayerId),

    #[error("player '{0}' is not registered")]
    NotRegistered(PlayerId),

    #[error("battle '{0}' already exists")]
    NameTaken(String),

    #[error("battle '{0}' does not exist")]
    NotFound(String),

    #[error("only player two can join battle '{0}'")]
    SelfJoin(String),

    #[error("battle '{0}' already started")]
    AlreadyStarted(String),

    #[error("player '{0}' is in a battle")]
    AlreadyInBattle(PlayerId),

    #[error("player '{player}' is not in battle '{battle}'")]
    NotInBattle { player: PlayerId, battle: String },

    #[error("player '{0}' has already made a move this round")]
    DuplicateMove(PlayerId),

    #[error("mana {have} not sufficient for attacking, need {need}")]
    InsufficientMana { have: u32, need: u32 },

    #[error("unknown token variant {0}")]
    UnknownVariant(u8),
}

impl LedgerError {
    /// Returns the stable variant name used on the wire.
    pub const fn kind(&self) -> &'static str {
        match self {
            LedgerError::AlreadyRegistered(_) => "AlreadyRegistered",
            LedgerError::NotRegistered(_) => "NotRegistered",
            LedgerError::NameTaken(_) => "NameTaken",
            LedgerError::NotFound(_) => "NotFound",
            LedgerError::SelfJoin(_) => "SelfJoin",
            LedgerError::AlreadyStarted(_) => "AlreadyStarted",
            LedgerError::AlreadyInBattle(_) => "AlreadyInBattle",
            LedgerError::NotInBattle { .. } => "NotInBattle",
            LedgerError::DuplicateMove(_) => "DuplicateMove",
            LedgerError::InsufficientMana { .. } => "InsufficientMana",
            LedgerError::UnknownVariant(_) => "UnknownVariant",
        }
    }
}
