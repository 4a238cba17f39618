//! Player registry.

use std::collections::HashMap;

use crate::error::LedgerError;
use crate::model::{Player, PlayerId, Token};
use crate::roll::{roll_stats, Entropy};

struct Entry {
    player: Player,
    token: Token,
}

/// Registered players and their tokens, keyed by identity.
#[derive(Default)]
pub struct PlayerRegistry {
    entries: HashMap<PlayerId, Entry>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a player and mints their token in one step.
    pub fn register(
        &mut self,
        id: PlayerId,
        player_name: &str,
        token_name: &str,
        entropy: &mut dyn Entropy,
    ) -> Result<&Player, LedgerError> {
        if self.entries.contains_key(&id) {
            return Err(LedgerError::AlreadyRegistered(id));
        }
        let stats = roll_stats(entropy);
        let token = Token {
            owner: id.clone(),
            name: token_name.to_string(),
            variant: stats.variant,
            attack: stats.attack,
            defense: stats.defense,
        };
        let entry = self.entries.entry(id.clone()).or_insert(Entry {
            player: Player::new(id, player_name),
            token,
        });
        Ok(&entry.player)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &PlayerId) -> Result<&Player, LedgerError> {
        self.entries
            .get(id)
            .map(|e| &e.player)
            .ok_or_else(|| LedgerError::NotRegistered(id.clone()))
    }

    pub fn get_token(&self, id: &PlayerId) -> Result<&Token, LedgerError> {
        self.entries
            .get(id)
            .map(|e| &e.token)
            .ok_or_else(|| LedgerError::NotRegistered(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_mut(&mut self, id: &PlayerId) -> Result<&mut Player, LedgerError> {
        self.entries
            .get_mut(id)
            .map(|e| &mut e.player)
            .ok_or_else(|| LedgerError::NotRegistered(id.clone()))
    }

    pub(crate) fn set_in_battle(&mut self, id: &PlayerId, in_battle: bool) -> Result<(), LedgerError> {
        self.get_mut(id)?.in_battle = in_battle;
        Ok(())
    }

    /// Applies signed resource deltas. Health and mana never drop below zero.
    pub(crate) fn apply_delta(
        &mut self,
        id: &PlayerId,
        health_delta: i32,
        mana_delta: i32,
    ) -> Result<(), LedgerError> {
        self.get_mut(id)?.apply(health_delta, mana_delta);
        Ok(())
    }

    pub(crate) fn reset_to_defaults(&mut self, id: &PlayerId) -> Result<(), LedgerError> {
        self.get_mut(id)?.reset();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{INITIAL_HEALTH, INITIAL_MANA, MAX_STRENGTH};
    use crate::roll::SequenceEntropy;

    fn alice() -> PlayerId {
        PlayerId::from("alice")
    }

    #[test]
    fn register_mints_token_with_rolled_stats() {
        let mut reg = PlayerRegistry::new();
        let mut entropy = SequenceEntropy::new([3, 4]);
        let player = reg.register(alice(), "CyberHacker", "NeonBlade", &mut entropy).unwrap();
        assert_eq!(player.name, "CyberHacker");
        assert_eq!(player.health, INITIAL_HEALTH);
        assert_eq!(player.mana, INITIAL_MANA);

        let token = reg.get_token(&alice()).unwrap();
        assert_eq!(token.name, "NeonBlade");
        assert_eq!(token.owner, alice());
        assert_eq!((token.attack, token.defense, token.variant), (3, 7, 4));
        assert_eq!(token.attack + token.defense, MAX_STRENGTH);
    }

    #[test]
    fn duplicate_registration_keeps_original_record() {
        let mut reg = PlayerRegistry::new();
        let mut entropy = SequenceEntropy::new([3, 4, 8, 1]);
        reg.register(alice(), "Player1", "Token1", &mut entropy).unwrap();

        let err = reg.register(alice(), "Player1Again", "Token1Again", &mut entropy).unwrap_err();
        assert_eq!(err, LedgerError::AlreadyRegistered(alice()));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(&alice()).unwrap().name, "Player1");
        assert_eq!(reg.get_token(&alice()).unwrap().attack, 3);
    }

    #[test]
    fn unknown_player_is_not_registered() {
        let reg = PlayerRegistry::new();
        assert_eq!(reg.get(&alice()).unwrap_err(), LedgerError::NotRegistered(alice()));
        assert!(reg.get_token(&alice()).is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn mutators_saturate_and_reset() {
        let mut reg = PlayerRegistry::new();
        let mut entropy = SequenceEntropy::default();
        reg.register(alice(), "Player1", "Token1", &mut entropy).unwrap();

        reg.set_in_battle(&alice(), true).unwrap();
        reg.apply_delta(&alice(), -30, -12).unwrap();
        let p = reg.get(&alice()).unwrap();
        assert_eq!((p.health, p.mana, p.in_battle), (0, 0, true));

        reg.reset_to_defaults(&alice()).unwrap();
        let p = reg.get(&alice()).unwrap();
        assert_eq!((p.health, p.mana, p.in_battle), (25, 10, false));
    }
}
