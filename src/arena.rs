//! Battle lifecycle.
//!
//! The arena owns every player and battle record and is the only writer of
//! either. Each operation checks all of its preconditions before its first
//! write, so a rejected call leaves the arena exactly as it was. Operations
//! take `&mut self`, which rules out re-entrant calls; [`crate::ledger::Ledger`]
//! adds the lock for shared use.
//!
//! Battle states: `Pending` (created) → `Started` (joined) → `Ended` (quit, or
//! a round leaves a side at zero health).

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::LedgerError;
use crate::model::{
    token_uri, Battle, BattleStatus, Move, Player, PlayerId, RoundRecord, Token, MAX_VARIANT,
    SLOT_COUNT, STEP,
};
use crate::registry::{BattleRegistry, PlayerRegistry};
use crate::resolve::{resolve_round, Fighter};
use crate::roll::{Entropy, RngEntropy};

/// Result of a successful move submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Submission {
    /// The move is recorded and the opponent has not moved yet.
    Waiting,
    /// Both moves were in; the round resolved and the battle goes on.
    Resolved(RoundRecord),
    /// The round resolved and left at least one side at zero health.
    /// `winner` is `None` when both sides fell together.
    Ended {
        record: RoundRecord,
        winner: Option<PlayerId>,
    },
}

/// The single-writer battle ledger.
pub struct Arena {
    players: PlayerRegistry,
    battles: BattleRegistry,
    entropy: Box<dyn Entropy + Send>,
    metadata_uri: String,
}

impl Arena {
    /// Creates an empty arena seeded from `config`.
    pub fn new(config: &Config) -> Self {
        Self::with_entropy(&config.metadata_uri, Box::new(RngEntropy::seeded(config.seed)))
    }

    /// Creates an empty arena drawing token stats from `entropy`.
    pub fn with_entropy(metadata_uri: &str, entropy: Box<dyn Entropy + Send>) -> Self {
        Arena {
            players: PlayerRegistry::new(),
            battles: BattleRegistry::new(),
            entropy,
            metadata_uri: metadata_uri.to_string(),
        }
    }

    /// Registers `id` and mints its token.
    pub fn register_player(
        &mut self,
        id: PlayerId,
        player_name: &str,
        token_name: &str,
    ) -> Result<&Player, LedgerError> {
        let player = self
            .players
            .register(id, player_name, token_name, self.entropy.as_mut())?;
        info!(player = %player.id, name = %player.name, "player registered");
        Ok(player)
    }

    /// Opens a pending battle with `creator` in slot 0.
    ///
    /// The creator is not marked in battle until someone joins, so a creator
    /// may have several pending battles open at once.
    pub fn create_battle(&mut self, creator: &PlayerId, name: &str) -> Result<&Battle, LedgerError> {
        if self.battles.name_taken(name) {
            return Err(LedgerError::NameTaken(name.to_string()));
        }
        if self.players.get(creator)?.in_battle {
            return Err(LedgerError::AlreadyInBattle(creator.clone()));
        }

        let battle = self.battles.create(name, creator.clone())?;
        info!(battle = %battle.name, creator = %creator, "battle created");
        Ok(battle)
    }

    /// Fills slot 1 of a pending battle and starts it.
    pub fn join_battle(&mut self, joiner: &PlayerId, name: &str) -> Result<&Battle, LedgerError> {
        let battle = self.battles.get(name)?;
        let creator = match battle.creator() {
            Some(c) => c.clone(),
            None => return Err(LedgerError::NotFound(name.to_string())),
        };
        if &creator == joiner {
            return Err(LedgerError::SelfJoin(name.to_string()));
        }
        if battle.status != BattleStatus::Pending {
            return Err(LedgerError::AlreadyStarted(name.to_string()));
        }
        if self.players.get(joiner)?.in_battle {
            return Err(LedgerError::AlreadyInBattle(joiner.clone()));
        }
        // The creator may have been pulled into another battle since creating this one.
        if self.players.get(&creator)?.in_battle {
            return Err(LedgerError::AlreadyInBattle(creator));
        }

        self.players.set_in_battle(&creator, true)?;
        self.players.set_in_battle(joiner, true)?;
        let battle = self.battles.get_mut(name)?;
        battle.players[1] = Some(joiner.clone());
        battle.status = BattleStatus::Started;
        info!(battle = %battle.name, %creator, %joiner, "battle started");
        Ok(battle)
    }

    /// Records `id`'s move for the open round and resolves the round once
    /// both slots have moved.
    pub fn attack_or_defend_choice(
        &mut self,
        id: &PlayerId,
        mv: Move,
        name: &str,
    ) -> Result<Submission, LedgerError> {
        let battle = self.battles.get(name)?;
        let slot = match battle.slot_of(id) {
            Some(slot) if battle.is_active() => slot,
            _ => return Err(not_in_battle(id, name)),
        };
        if battle.has_moved(slot) {
            return Err(LedgerError::DuplicateMove(id.clone()));
        }
        if mv == Move::Attack {
            let have = self.players.get(id)?.mana;
            if have < STEP {
                return Err(LedgerError::InsufficientMana { have, need: STEP });
            }
        }

        let battle = self.battles.get_mut(name)?;
        battle.pending[slot] = Some(mv);
        debug!(battle = %name, player = %id, ?mv, round = battle.round, "move submitted");

        match battle.ready_moves() {
            Some(moves) => self.finish_round(name, moves),
            None => Ok(Submission::Waiting),
        }
    }

    /// Ends a battle on behalf of `id`; the other participant wins.
    ///
    /// Quitting a pending battle withdraws it with no winner and leaves the
    /// creator's resources alone.
    pub fn quit_battle(&mut self, id: &PlayerId, name: &str) -> Result<&Battle, LedgerError> {
        let battle = self.battles.get(name)?;
        let slot = match battle.slot_of(id) {
            Some(slot) if battle.status != BattleStatus::Ended => slot,
            _ => return Err(not_in_battle(id, name)),
        };
        let winner = battle.opponent(slot).cloned();
        info!(battle = %name, quitter = %id, "player quit");

        self.settle(name, winner)?;
        self.battles.get(name)
    }

    pub fn get_player(&self, id: &PlayerId) -> Result<&Player, LedgerError> {
        self.players.get(id)
    }

    pub fn get_player_token(&self, id: &PlayerId) -> Result<&Token, LedgerError> {
        self.players.get_token(id)
    }

    pub fn get_battle(&self, name: &str) -> Result<&Battle, LedgerError> {
        self.battles.get(name)
    }

    /// Returns every battle ever created, in creation order.
    pub fn get_all_battles(&self) -> &[Battle] {
        self.battles.list_all()
    }

    /// Returns `<base>/<variant>.json` for a known token variant.
    pub fn token_metadata_uri(&self, variant: u8) -> Result<String, LedgerError> {
        if variant > MAX_VARIANT {
            return Err(LedgerError::UnknownVariant(variant));
        }
        Ok(token_uri(&self.metadata_uri, variant))
    }

    /// Applies a fully submitted round and settles the battle if a side fell.
    fn finish_round(
        &mut self,
        name: &str,
        moves: [Move; SLOT_COUNT],
    ) -> Result<Submission, LedgerError> {
        let ids = match self.battles.get(name)?.participants() {
            Some([a, b]) => [a.clone(), b.clone()],
            None => return Err(LedgerError::NotFound(name.to_string())),
        };
        let fighters = [self.fighter(&ids[0])?, self.fighter(&ids[1])?];
        let deltas = resolve_round(moves, fighters);

        for (id, delta) in ids.iter().zip(deltas.iter()) {
            self.players.apply_delta(id, delta.health, delta.mana)?;
        }

        let battle = self.battles.get_mut(name)?;
        let record = RoundRecord {
            round: battle.round,
            moves,
            deltas,
        };
        battle.pending = [None; SLOT_COUNT];
        battle.round += 1;
        battle.history.push(record.clone());
        debug!(battle = %name, round = record.round, ?moves, ?deltas, "round resolved");

        let down = [
            self.players.get(&ids[0])?.is_defeated(),
            self.players.get(&ids[1])?.is_defeated(),
        ];
        let winner = match down {
            [false, false] => return Ok(Submission::Resolved(record)),
            [true, false] => Some(ids[1].clone()),
            [false, true] => Some(ids[0].clone()),
            [true, true] => None,
        };
        self.settle(name, winner.clone())?;
        Ok(Submission::Ended { record, winner })
    }

    fn fighter(&self, id: &PlayerId) -> Result<Fighter, LedgerError> {
        let player = self.players.get(id)?;
        let token = self.players.get_token(id)?;
        Ok(Fighter {
            health: player.health,
            mana: player.mana,
            attack: token.attack,
            defense: token.defense,
        })
    }

    /// Moves a battle to `Ended`. Participants of a started battle are reset
    /// to their defaults.
    fn settle(&mut self, name: &str, winner: Option<PlayerId>) -> Result<(), LedgerError> {
        let battle = self.battles.get_mut(name)?;
        let was_started = battle.is_active();
        battle.status = BattleStatus::Ended;
        battle.winner = winner;
        battle.pending = [None; SLOT_COUNT];
        let participants: Vec<PlayerId> = battle.players.iter().flatten().cloned().collect();
        info!(battle = %name, winner = ?battle.winner, "battle ended");

        if was_started {
            for id in &participants {
                self.players.reset_to_defaults(id)?;
            }
        }
        Ok(())
    }
}

fn not_in_battle(id: &PlayerId, name: &str) -> LedgerError {
    LedgerError::NotInBattle {
        player: id.clone(),
        battle: name.to_string(),
    }
}
