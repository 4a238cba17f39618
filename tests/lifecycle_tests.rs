//! Battle lifecycle tests against the public ledger API.
//!
//! Covers registration, battle creation and joining, round resolution for
//! each move pairing, settlement, and the all-or-nothing failure rule.

use neonwarriors::arena::{Arena, Submission};
use neonwarriors::error::LedgerError;
use neonwarriors::model::{BattleStatus, Move, PlayerId, MAX_STRENGTH, MAX_VARIANT};
use neonwarriors::roll::{RngEntropy, SequenceEntropy};

const METADATA_URI: &str = "https://gateway.pinata.cloud/ipfs/QmX2ubhtBPtYw75Wrpv6HLb1fhbJqxrnbhDo1RViW3oVoi";

fn id(s: &str) -> PlayerId {
    PlayerId::from(s)
}

/// Arena whose first two registrations roll attack 2 / defense 8 so that
/// mutual attacks deal 2 damage a side (ceil(20 / 18)).
fn arena() -> Arena {
    Arena::with_entropy(METADATA_URI, Box::new(SequenceEntropy::new([2, 0, 2, 1, 2, 2])))
}

fn with_players() -> Arena {
    let mut arena = arena();
    arena.register_player(id("p1"), "Player1", "Token1").unwrap();
    arena.register_player(id("p2"), "Player2", "Token2").unwrap();
    arena
}

fn started() -> Arena {
    let mut arena = with_players();
    arena.create_battle(&id("p1"), "TestBattle").unwrap();
    arena.join_battle(&id("p2"), "TestBattle").unwrap();
    arena
}

fn mana(arena: &Arena, who: &str) -> u32 {
    arena.get_player(&id(who)).unwrap().mana
}

fn health(arena: &Arena, who: &str) -> u32 {
    arena.get_player(&id(who)).unwrap().health
}

fn round(arena: &mut Arena, m1: Move, m2: Move) -> Submission {
    assert_eq!(
        arena.attack_or_defend_choice(&id("p1"), m1, "TestBattle").unwrap(),
        Submission::Waiting
    );
    arena.attack_or_defend_choice(&id("p2"), m2, "TestBattle").unwrap()
}

// ---- registration ----

#[test]
fn register_new_player() {
    let mut arena = arena();
    let player = arena.register_player(id("p1"), "CyberHacker", "NeonBlade").unwrap();
    assert_eq!(player.name, "CyberHacker");
    assert_eq!(player.health, 25);
    assert_eq!(player.mana, 10);
    assert!(!player.in_battle);
}

#[test]
fn duplicate_registration_rejected_without_change() {
    let mut arena = with_players();
    let before = arena.get_player(&id("p1")).unwrap().clone();
    let token_before = arena.get_player_token(&id("p1")).unwrap().clone();

    let err = arena.register_player(id("p1"), "Player1Again", "Token1Again").unwrap_err();
    assert_eq!(err, LedgerError::AlreadyRegistered(id("p1")));
    assert_eq!(arena.get_player(&id("p1")).unwrap(), &before);
    assert_eq!(arena.get_player_token(&id("p1")).unwrap(), &token_before);
}

#[test]
fn minted_token_stats_are_valid() {
    let mut arena = Arena::with_entropy(METADATA_URI, Box::new(RngEntropy::seeded(2024)));
    for i in 0..200 {
        let pid = PlayerId::new(format!("p{i}"));
        arena.register_player(pid.clone(), "P", "T").unwrap();
        let token = arena.get_player_token(&pid).unwrap();
        assert!(token.attack > 0 && token.defense > 0);
        assert_eq!(token.attack + token.defense, MAX_STRENGTH);
        assert!(token.variant <= MAX_VARIANT);
        assert_eq!(token.owner, pid);
    }
}

#[test]
fn registrations_draw_fresh_stats() {
    let mut arena = Arena::with_entropy(METADATA_URI, Box::new(RngEntropy::seeded(31)));
    let mut attacks = std::collections::HashSet::new();
    for i in 0..50 {
        let pid = PlayerId::new(format!("p{i}"));
        arena.register_player(pid.clone(), "P", "T").unwrap();
        attacks.insert(arena.get_player_token(&pid).unwrap().attack);
    }
    assert!(attacks.len() > 1, "50 registrations rolled a single attack value");
}

#[test]
fn queries_on_unknown_player_fail() {
    let arena = arena();
    assert_eq!(
        arena.get_player(&id("ghost")).unwrap_err(),
        LedgerError::NotRegistered(id("ghost"))
    );
    assert!(arena.get_player_token(&id("ghost")).is_err());
}

// ---- creation and joining ----

#[test]
fn create_battle_is_pending() {
    let mut arena = with_players();
    arena.create_battle(&id("p1"), "GridWar001").unwrap();
    let battle = arena.get_battle("GridWar001").unwrap();
    assert_eq!(battle.name, "GridWar001");
    assert_eq!(battle.status, BattleStatus::Pending);
    assert_eq!(battle.players, [Some(id("p1")), None]);
    assert_eq!(battle.winner, None);
}

#[test]
fn duplicate_battle_name_rejected() {
    let mut arena = with_players();
    arena.create_battle(&id("p1"), "GridWar001").unwrap();
    let err = arena.create_battle(&id("p2"), "GridWar001").unwrap_err();
    assert_eq!(err, LedgerError::NameTaken("GridWar001".to_string()));
    assert_eq!(arena.get_all_battles().len(), 1);
}

#[test]
fn ended_battle_name_cannot_be_reused() {
    let mut arena = started();
    arena.quit_battle(&id("p1"), "TestBattle").unwrap();
    let err = arena.create_battle(&id("p1"), "TestBattle").unwrap_err();
    assert_eq!(err, LedgerError::NameTaken("TestBattle".to_string()));
}

#[test]
fn unregistered_player_cannot_create() {
    let mut arena = arena();
    let err = arena.create_battle(&id("p1"), "TestBattle").unwrap_err();
    assert_eq!(err, LedgerError::NotRegistered(id("p1")));
    assert!(arena.get_all_battles().is_empty());
}

#[test]
fn player_in_battle_cannot_create() {
    let mut arena = started();
    let err = arena.create_battle(&id("p1"), "Battle2").unwrap_err();
    assert_eq!(err, LedgerError::AlreadyInBattle(id("p1")));
    assert!(arena.get_battle("Battle2").is_err());
}

#[test]
fn second_player_joins() {
    let arena = started();
    let battle = arena.get_battle("TestBattle").unwrap();
    assert_eq!(battle.status, BattleStatus::Started);
    assert_eq!(battle.players[1], Some(id("p2")));
    assert_ne!(battle.players[0], battle.players[1]);
    assert!(arena.get_player(&id("p1")).unwrap().in_battle);
    assert!(arena.get_player(&id("p2")).unwrap().in_battle);
}

#[test]
fn creator_cannot_join_own_battle() {
    let mut arena = with_players();
    arena.create_battle(&id("p1"), "GridWar001").unwrap();
    let err = arena.join_battle(&id("p1"), "GridWar001").unwrap_err();
    assert_eq!(err, LedgerError::SelfJoin("GridWar001".to_string()));
    assert_eq!(arena.get_battle("GridWar001").unwrap().status, BattleStatus::Pending);
}

#[test]
fn started_battle_cannot_be_joined() {
    let mut arena = started();
    arena.register_player(id("p3"), "Player3", "Token3").unwrap();
    let err = arena.join_battle(&id("p3"), "TestBattle").unwrap_err();
    assert_eq!(err, LedgerError::AlreadyStarted("TestBattle".to_string()));
    assert!(!arena.get_player(&id("p3")).unwrap().in_battle);
}

#[test]
fn unknown_battle_cannot_be_joined() {
    let mut arena = with_players();
    let err = arena.join_battle(&id("p2"), "Nowhere").unwrap_err();
    assert_eq!(err, LedgerError::NotFound("Nowhere".to_string()));
}

#[test]
fn unregistered_player_cannot_join() {
    let mut arena = with_players();
    arena.create_battle(&id("p1"), "GridWar001").unwrap();
    let err = arena.join_battle(&id("ghost"), "GridWar001").unwrap_err();
    assert_eq!(err, LedgerError::NotRegistered(id("ghost")));
}

#[test]
fn player_in_battle_cannot_join_another() {
    let mut arena = with_players();
    arena.register_player(id("p3"), "Player3", "Token3").unwrap();
    arena.create_battle(&id("p1"), "Battle1").unwrap();
    arena.create_battle(&id("p3"), "Battle2").unwrap();
    arena.join_battle(&id("p2"), "Battle1").unwrap();

    let err = arena.join_battle(&id("p2"), "Battle2").unwrap_err();
    assert_eq!(err, LedgerError::AlreadyInBattle(id("p2")));
    let battle = arena.get_battle("Battle2").unwrap();
    assert_eq!(battle.status, BattleStatus::Pending);
    assert_eq!(battle.players[1], None);
    assert!(!arena.get_player(&id("p3")).unwrap().in_battle);
}

#[test]
fn all_battles_listed_in_creation_order() {
    let mut arena = with_players();
    arena.create_battle(&id("p1"), "Battle1").unwrap();
    arena.create_battle(&id("p1"), "Battle2").unwrap();
    arena.join_battle(&id("p2"), "Battle1").unwrap();
    arena.quit_battle(&id("p2"), "Battle1").unwrap();
    arena.create_battle(&id("p2"), "Battle3").unwrap();

    let names: Vec<&str> = arena.get_all_battles().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Battle1", "Battle2", "Battle3"]);
    assert_eq!(arena.get_all_battles()[0].status, BattleStatus::Ended);
}

// ---- round resolution ----

#[test]
fn attack_vs_attack_costs_mana_and_health() {
    let mut arena = started();
    let outcome = round(&mut arena, Move::Attack, Move::Attack);
    assert!(matches!(outcome, Submission::Resolved(_)));
    assert_eq!(mana(&arena, "p1"), 7);
    assert_eq!(mana(&arena, "p2"), 7);
    assert!(health(&arena, "p1") < 25);
    assert!(health(&arena, "p2") < 25);
}

#[test]
fn attack_vs_defend_moves_mana_only() {
    let mut arena = started();
    round(&mut arena, Move::Attack, Move::Defend);
    assert_eq!(mana(&arena, "p1"), 7);
    assert_eq!(mana(&arena, "p2"), 13);
    assert_eq!(health(&arena, "p1"), 25);
    assert_eq!(health(&arena, "p2"), 25);
}

#[test]
fn defend_vs_attack_mirrors() {
    let mut arena = started();
    round(&mut arena, Move::Defend, Move::Attack);
    assert_eq!(mana(&arena, "p1"), 13);
    assert_eq!(mana(&arena, "p2"), 7);
}

#[test]
fn defend_vs_defend_gains_mana() {
    let mut arena = started();
    round(&mut arena, Move::Defend, Move::Defend);
    assert_eq!(mana(&arena, "p1"), 13);
    assert_eq!(mana(&arena, "p2"), 13);
    assert_eq!(health(&arena, "p1"), 25);
    assert_eq!(health(&arena, "p2"), 25);
}

#[test]
fn second_move_in_same_round_rejected() {
    let mut arena = started();
    arena.attack_or_defend_choice(&id("p1"), Move::Attack, "TestBattle").unwrap();
    let before = arena.get_battle("TestBattle").unwrap().clone();

    let err = arena
        .attack_or_defend_choice(&id("p1"), Move::Defend, "TestBattle")
        .unwrap_err();
    assert_eq!(err, LedgerError::DuplicateMove(id("p1")));
    assert_eq!(arena.get_battle("TestBattle").unwrap(), &before);
    assert_eq!(mana(&arena, "p1"), 10);
}

#[test]
fn attack_requires_mana() {
    let mut arena = started();
    for _ in 0..3 {
        round(&mut arena, Move::Attack, Move::Attack);
    }
    // 3 rounds of 2 damage each: both alive at 19 health with 1 mana.
    assert_eq!(mana(&arena, "p1"), 1);
    assert_eq!(health(&arena, "p1"), 19);

    let err = arena
        .attack_or_defend_choice(&id("p1"), Move::Attack, "TestBattle")
        .unwrap_err();
    assert_eq!(err, LedgerError::InsufficientMana { have: 1, need: 3 });
    assert!(!arena.get_battle("TestBattle").unwrap().has_moved(0));

    // Defending is always allowed.
    arena.attack_or_defend_choice(&id("p1"), Move::Defend, "TestBattle").unwrap();
}

#[test]
fn round_history_records_moves_and_deltas() {
    let mut arena = started();
    round(&mut arena, Move::Attack, Move::Defend);
    round(&mut arena, Move::Defend, Move::Defend);

    let battle = arena.get_battle("TestBattle").unwrap();
    assert_eq!(battle.round, 2);
    assert_eq!(battle.history.len(), 2);
    assert_eq!(battle.history[0].moves, [Move::Attack, Move::Defend]);
    assert_eq!(battle.history[0].deltas[0].mana, -3);
    assert_eq!(battle.history[0].deltas[1].mana, 3);
    assert_eq!(battle.history[1].round, 1);
}

#[test]
fn non_participant_cannot_move() {
    let mut arena = started();
    arena.register_player(id("p3"), "Player3", "Token3").unwrap();
    let err = arena
        .attack_or_defend_choice(&id("p3"), Move::Defend, "TestBattle")
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotInBattle { .. }));
}

#[test]
fn pending_battle_takes_no_moves() {
    let mut arena = with_players();
    arena.create_battle(&id("p1"), "GridWar001").unwrap();
    let err = arena
        .attack_or_defend_choice(&id("p1"), Move::Defend, "GridWar001")
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotInBattle { .. }));
}

#[test]
fn knockout_ends_battle_and_resets_players() {
    // p1 rolls attack 9 (def 1), p2 attack 1 (def 9); p2 takes ceil(90 / 19) = 5 a round.
    let mut arena = Arena::with_entropy(METADATA_URI, Box::new(SequenceEntropy::new([9, 0, 1, 0])));
    arena.register_player(id("p1"), "Player1", "Token1").unwrap();
    arena.register_player(id("p2"), "Player2", "Token2").unwrap();
    arena.create_battle(&id("p1"), "TestBattle").unwrap();
    arena.join_battle(&id("p2"), "TestBattle").unwrap();

    let mut outcome = Submission::Waiting;
    for _ in 0..20 {
        let m1 = if mana(&arena, "p1") >= 3 { Move::Attack } else { Move::Defend };
        let m2 = if mana(&arena, "p2") >= 3 { Move::Attack } else { Move::Defend };
        outcome = round(&mut arena, m1, m2);
        if matches!(outcome, Submission::Ended { .. }) {
            break;
        }
    }

    let Submission::Ended { winner, record } = outcome else {
        panic!("battle was not decided within 20 rounds");
    };
    assert_eq!(winner, Some(id("p1")));
    assert!(record.deltas[1].health < 0);

    let battle = arena.get_battle("TestBattle").unwrap();
    assert_eq!(battle.status, BattleStatus::Ended);
    assert_eq!(battle.winner, Some(id("p1")));
    for who in ["p1", "p2"] {
        let p = arena.get_player(&id(who)).unwrap();
        assert_eq!((p.health, p.mana, p.in_battle), (25, 10, false));
    }
}

#[test]
fn simultaneous_knockout_is_a_draw() {
    // Both roll attack 9 (def 1): each side takes ceil(90 / 11) = 9 a round.
    let mut arena = Arena::with_entropy(METADATA_URI, Box::new(SequenceEntropy::new([9, 0, 9, 0])));
    arena.register_player(id("p1"), "Player1", "Token1").unwrap();
    arena.register_player(id("p2"), "Player2", "Token2").unwrap();
    arena.create_battle(&id("p1"), "TestBattle").unwrap();
    arena.join_battle(&id("p2"), "TestBattle").unwrap();

    assert!(matches!(round(&mut arena, Move::Attack, Move::Attack), Submission::Resolved(_)));
    assert!(matches!(round(&mut arena, Move::Attack, Move::Attack), Submission::Resolved(_)));
    assert_eq!((health(&arena, "p1"), health(&arena, "p2")), (7, 7));

    let Submission::Ended { winner, record } = round(&mut arena, Move::Attack, Move::Attack) else {
        panic!("both sides should fall in the third round");
    };
    assert_eq!(winner, None);
    assert_eq!(record.round, 2);
    assert_eq!(record.deltas[0].health, -7);
    assert_eq!(record.deltas[1].health, -7);

    let battle = arena.get_battle("TestBattle").unwrap();
    assert_eq!(battle.status, BattleStatus::Ended);
    assert_eq!(battle.winner, None);
    for who in ["p1", "p2"] {
        let p = arena.get_player(&id(who)).unwrap();
        assert_eq!((p.health, p.mana, p.in_battle), (25, 10, false));
    }
}

// ---- settlement ----

#[test]
fn quit_ends_battle_and_other_player_wins() {
    let mut arena = started();
    round(&mut arena, Move::Attack, Move::Attack);

    let battle = arena.quit_battle(&id("p1"), "TestBattle").unwrap();
    assert_eq!(battle.status, BattleStatus::Ended);
    assert_eq!(battle.winner, Some(id("p2")));
    for who in ["p1", "p2"] {
        let p = arena.get_player(&id(who)).unwrap();
        assert!(!p.in_battle);
        assert_eq!(p.health, 25);
        assert_eq!(p.mana, 10);
    }
}

#[test]
fn players_can_battle_again_after_quit() {
    let mut arena = started();
    arena.quit_battle(&id("p1"), "TestBattle").unwrap();
    arena.create_battle(&id("p1"), "NewBattle").unwrap();
    arena.join_battle(&id("p2"), "NewBattle").unwrap();
    assert_eq!(arena.get_battle("NewBattle").unwrap().status, BattleStatus::Started);
}

#[test]
fn quit_twice_rejected() {
    let mut arena = started();
    arena.quit_battle(&id("p1"), "TestBattle").unwrap();
    let err = arena.quit_battle(&id("p2"), "TestBattle").unwrap_err();
    assert!(matches!(err, LedgerError::NotInBattle { .. }));
    assert_eq!(
        arena.get_battle("TestBattle").unwrap().winner,
        Some(id("p2"))
    );
}

#[test]
fn outsider_cannot_quit() {
    let mut arena = started();
    arena.register_player(id("p3"), "Player3", "Token3").unwrap();
    let err = arena.quit_battle(&id("p3"), "TestBattle").unwrap_err();
    assert_eq!(
        err,
        LedgerError::NotInBattle {
            player: id("p3"),
            battle: "TestBattle".to_string(),
        }
    );
    assert_eq!(arena.get_battle("TestBattle").unwrap().status, BattleStatus::Started);
}

#[test]
fn moves_after_end_rejected() {
    let mut arena = started();
    arena.quit_battle(&id("p2"), "TestBattle").unwrap();
    let err = arena
        .attack_or_defend_choice(&id("p1"), Move::Defend, "TestBattle")
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotInBattle { .. }));
}

// ---- metadata ----

#[test]
fn token_uri_uses_base_and_variant() {
    let arena = arena();
    let uri = arena.token_metadata_uri(0).unwrap();
    assert!(uri.starts_with(METADATA_URI));
    assert!(uri.ends_with("/0.json"));
}
