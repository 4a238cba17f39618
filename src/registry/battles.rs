//! Battle registry.
//!
//! Battles are stored in creation order and never removed. Names go into a
//! write-once set so a name stays taken after its battle ends.

use std::collections::{HashMap, HashSet};

use crate::error::LedgerError;
use crate::model::{Battle, PlayerId};

/// All battles ever created.
#[derive(Default)]
pub struct BattleRegistry {
    battles: Vec<Battle>,
    index: HashMap<String, usize>,
    used_names: HashSet<String>,
}

impl BattleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `name` has ever been used.
    pub fn name_taken(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    /// Stores a new pending battle. Participant checks are the caller's job.
    pub(crate) fn create(&mut self, name: &str, creator: PlayerId) -> Result<&Battle, LedgerError> {
        if !self.used_names.insert(name.to_string()) {
            return Err(LedgerError::NameTaken(name.to_string()));
        }
        let idx = self.battles.len();
        self.battles.push(Battle::new(name, creator));
        self.index.insert(name.to_string(), idx);
        Ok(&self.battles[idx])
    }

    pub fn get(&self, name: &str) -> Result<&Battle, LedgerError> {
        self.index
            .get(name)
            .map(|&i| &self.battles[i])
            .ok_or_else(|| LedgerError::NotFound(name.to_string()))
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Result<&mut Battle, LedgerError> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.battles[i]),
            None => Err(LedgerError::NotFound(name.to_string())),
        }
    }

    /// Returns every battle in creation order, ended ones included.
    pub fn list_all(&self) -> &[Battle] {
        &self.battles
    }

    pub fn len(&self) -> usize {
        self.battles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.battles.is_empty()
    }
}
