use holdem_engine::config::EngineConfig;
use holdem_engine::engine::PokerEngine;
use holdem_engine::errors::{BetRejection, GameError};
use holdem_engine::game::Stage;
use holdem_engine::service::GameService;

fn engine() -> PokerEngine {
    let mut e = PokerEngine::new(EngineConfig::heads_up().with_seed(11)).expect("engine");
    e.initialize().expect("initialize");
    e
}

fn assert_rejected(e: &mut PokerEngine, index: usize, amount: u64, reason: BetRejection) {
    let before = e.state();
    assert_eq!(
        e.place_bet(index, amount),
        Err(GameError::InvalidBet(reason))
    );
    assert_eq!(e.state(), before, "rejected bet must not change state");
}

#[test]
fn zero_bet_is_non_positive() {
    let mut e = engine();
    assert_rejected(&mut e, 0, 0, BetRejection::NonPositive);
}

#[test]
fn bet_larger_than_stack_is_rejected() {
    let mut e = engine();
    assert_rejected(
        &mut e,
        0,
        150,
        BetRejection::ExceedsStack {
            amount: 150,
            chips: 100,
        },
    );
}

#[test]
fn out_of_turn_bet_is_rejected() {
    let mut e = engine();
    assert_rejected(
        &mut e,
        1,
        10,
        BetRejection::OutOfTurn {
            expected: 0,
            actual: 1,
        },
    );
}

#[test]
fn unknown_seat_is_rejected() {
    let mut e = engine();
    assert_rejected(
        &mut e,
        4,
        10,
        BetRejection::UnknownPlayer {
            index: 4,
            players: 2,
        },
    );
}

#[test]
fn agent_cannot_act_on_the_humans_turn() {
    let mut e = engine();
    let before = e.state();
    assert_eq!(
        e.ai_action(),
        Err(GameError::InvalidBet(BetRejection::NotAgentTurn { index: 0 }))
    );
    assert_eq!(e.state(), before);
}

#[test]
fn betting_closes_at_showdown() {
    let mut e = engine();
    for _ in 0..4 {
        e.advance_stage().unwrap();
    }
    assert_eq!(e.state().unwrap().stage, Stage::Showdown);
    assert_rejected(
        &mut e,
        0,
        10,
        BetRejection::BettingClosed {
            stage: Stage::Showdown,
        },
    );
}

#[test]
fn all_in_is_allowed_and_empties_the_stack() {
    let mut e = engine();
    let s = e.place_bet(0, 100).unwrap();
    assert_eq!(s.players[0].chips, 0);
    assert_eq!(s.pot, 100);
    assert_eq!(s.current_bet, 100);

    // busted seats still take turns but cannot bet
    let s = e.ai_action().unwrap();
    assert_eq!(s.pot, 200);
    e.advance_stage().unwrap();
    assert_rejected(
        &mut e,
        0,
        1,
        BetRejection::ExceedsStack {
            amount: 1,
            chips: 0,
        },
    );
}

#[test]
fn service_rejects_signed_amounts_with_the_error_text() {
    let svc = GameService::new(EngineConfig::heads_up().with_seed(3)).unwrap();
    svc.initialize_game().unwrap();
    let before = svc.get_game_state();

    for amount in [0, -1, i64::MIN] {
        assert_eq!(
            svc.place_bet(amount),
            Err("Invalid bet: amount must be a positive integer".to_string())
        );
    }
    assert_eq!(
        svc.place_bet(101),
        Err("Invalid bet: amount 101 exceeds remaining chips 100".to_string())
    );
    assert_eq!(
        svc.place_bet_for(1, 10),
        Err("Invalid bet: it's not player 1's turn (expected player 0)".to_string())
    );
    assert_eq!(svc.get_game_state(), before);
}
