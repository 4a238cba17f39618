//! Simultaneous attack/defend resolution.
//!
//! | slot 0 | slot 1 | slot 0 delta            | slot 1 delta            |
//! |--------|--------|-------------------------|-------------------------|
//! | Attack | Attack | -damage, -STEP mana     | -damage, -STEP mana     |
//! | Attack | Defend | -STEP mana              | +STEP mana              |
//! | Defend | Attack | +STEP mana              | -STEP mana              |
//! | Defend | Defend | +STEP mana              | +STEP mana              |
//!
//! A defended attack costs the attacker its mana and deals nothing.

use crate::model::{Delta, Move, MAX_STRENGTH, STEP};

/// The state of one side going into a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fighter {
    pub health: u32,
    pub mana: u32,
    pub attack: u8,
    pub defense: u8,
}

/// Health lost by a defender with strength `defense` to an attack of
/// strength `attack`: `ceil(attack * MAX / (MAX + defense))`.
///
/// Never exceeds `attack` and is at least 1 whenever `attack > 0`.
pub fn damage(attack: u8, defense: u8) -> u32 {
    let max = MAX_STRENGTH as u32;
    let num = attack as u32 * max;
    let den = max + defense as u32;
    num.div_ceil(den)
}

fn mana_delta(mv: Move) -> i32 {
    match mv {
        Move::Attack => -(STEP as i32),
        Move::Defend => STEP as i32,
    }
}

/// Computes the deltas for one round.
///
/// Deltas are bounded by the current resources, so applying them never takes
/// health or mana below zero.
pub fn resolve_round(moves: [Move; 2], fighters: [Fighter; 2]) -> [Delta; 2] {
    let mut deltas = [Delta::default(); 2];
    for slot in 0..2 {
        let me = fighters[slot];
        let foe = fighters[1 - slot];

        let mana = mana_delta(moves[slot]).max(-(me.mana as i32));
        let health = match moves {
            [Move::Attack, Move::Attack] => {
                let hit = damage(foe.attack, me.defense).min(me.health);
                -(hit as i32)
            }
            _ => 0,
        };
        deltas[slot] = Delta { health, mana };
    }
    deltas
}
