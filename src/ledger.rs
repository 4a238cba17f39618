//! Shared, serialized access to an [`Arena`].
//!
//! Every operation takes the lock once and holds it until the operation has
//! fully committed or failed. Queries return owned snapshots so no borrow
//! outlives the lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::arena::{Arena, Submission};
use crate::config::Config;
use crate::error::LedgerError;
use crate::model::{Battle, Move, Player, PlayerId, Token};

/// Cloneable handle to one arena shared across threads.
#[derive(Clone)]
pub struct Ledger {
    inner: Arc<Mutex<Arena>>,
}

impl Ledger {
    pub fn new(config: &Config) -> Self {
        Self::from_arena(Arena::new(config))
    }

    pub fn from_arena(arena: Arena) -> Self {
        Ledger {
            inner: Arc::new(Mutex::new(arena)),
        }
    }

    // Arena operations validate before their first write, so a poisoned
    // arena is still consistent.
    fn lock(&self) -> MutexGuard<'_, Arena> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register_player(
        &self,
        id: PlayerId,
        player_name: &str,
        token_name: &str,
    ) -> Result<Player, LedgerError> {
        self.lock()
            .register_player(id, player_name, token_name)
            .cloned()
    }

    pub fn create_battle(&self, creator: &PlayerId, name: &str) -> Result<Battle, LedgerError> {
        self.lock().create_battle(creator, name).cloned()
    }

    pub fn join_battle(&self, joiner: &PlayerId, name: &str) -> Result<Battle, LedgerError> {
        self.lock().join_battle(joiner, name).cloned()
    }

    pub fn attack_or_defend_choice(
        &self,
        id: &PlayerId,
        mv: Move,
        name: &str,
    ) -> Result<Submission, LedgerError> {
        self.lock().attack_or_defend_choice(id, mv, name)
    }

    pub fn quit_battle(&self, id: &PlayerId, name: &str) -> Result<Battle, LedgerError> {
        self.lock().quit_battle(id, name).cloned()
    }

    pub fn get_player(&self, id: &PlayerId) -> Result<Player, LedgerError> {
        self.lock().get_player(id).cloned()
    }

    pub fn get_player_token(&self, id: &PlayerId) -> Result<Token, LedgerError> {
        self.lock().get_player_token(id).cloned()
    }

    pub fn get_battle(&self, name: &str) -> Result<Battle, LedgerError> {
        self.lock().get_battle(name).cloned()
    }

    pub fn get_all_battles(&self) -> Vec<Battle> {
        self.lock().get_all_battles().to_vec()
    }

    pub fn token_metadata_uri(&self, variant: u8) -> Result<String, LedgerError> {
        self.lock().token_metadata_uri(variant)
    }
}
