use crate::agent::AgentDecision;
use crate::errors::{BetRejection, GameError};
use crate::game::GameState;
use crate::player::Player;
use serde::{Deserialize, Serialize};

/// A betting move that has passed validation and can be applied as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedAction {
    Check,
    Bet(u64),
}

/// Validates a bet of `amount` chips by the player at `index`.
///
/// # Errors
///
/// Returns [`GameError::InvalidBet`] when:
/// - the hand is at [`Showdown`](crate::game::Stage::Showdown) ([`BetRejection::BettingClosed`])
/// - `index` does not name a seat ([`BetRejection::UnknownPlayer`])
/// - it is another player's turn ([`BetRejection::OutOfTurn`])
/// - `amount` is zero ([`BetRejection::NonPositive`])
/// - `amount` exceeds the player's chips ([`BetRejection::ExceedsStack`])
///
/// # Examples
///
/// ```
/// use holdem_engine::game::GameState;
/// use holdem_engine::player::{Controller, Player};
/// use holdem_engine::rules::{validate_bet, ValidatedAction};
///
/// let state = GameState::new(vec![
///     Player::new(100, Controller::Human),
///     Player::new(100, Controller::Agent),
/// ]);
/// assert_eq!(validate_bet(&state, 0, 20), Ok(ValidatedAction::Bet(20)));
/// assert!(validate_bet(&state, 0, 0).is_err());
/// assert!(validate_bet(&state, 0, 101).is_err());
/// assert!(validate_bet(&state, 1, 20).is_err());
/// ```
pub fn validate_bet(
    state: &GameState,
    index: usize,
    amount: u64,
) -> Result<ValidatedAction, GameError> {
    let player = seat_to_act(state, index)?;
    if amount == 0 {
        return Err(BetRejection::NonPositive.into());
    }
    if amount > player.chips {
        return Err(BetRejection::ExceedsStack {
            amount,
            chips: player.chips,
        }
        .into());
    }
    Ok(ValidatedAction::Bet(amount))
}

/// Returns the index of the agent seat whose turn it is.
pub fn validate_agent_turn(state: &GameState) -> Result<usize, GameError> {
    let index = state.current_player_index;
    let player = seat_to_act(state, index)?;
    if !player.is_agent() {
        return Err(BetRejection::NotAgentTurn { index }.into());
    }
    Ok(index)
}

/// Validates an agent's decision with the same rules as a human bet.
pub fn validate_decision(
    state: &GameState,
    index: usize,
    decision: AgentDecision,
) -> Result<ValidatedAction, GameError> {
    match decision {
        AgentDecision::Check => {
            seat_to_act(state, index)?;
            Ok(ValidatedAction::Check)
        }
        AgentDecision::Bet(amount) => validate_bet(state, index, amount),
    }
}

fn seat_to_act(state: &GameState, index: usize) -> Result<&Player, GameError> {
    if state.is_terminal() {
        return Err(BetRejection::BettingClosed { stage: state.stage }.into());
    }
    let player = state
        .players
        .get(index)
        .ok_or(BetRejection::UnknownPlayer {
            index,
            players: state.player_count(),
        })?;
    if index != state.current_player_index {
        return Err(BetRejection::OutOfTurn {
            expected: state.current_player_index,
            actual: index,
        }
        .into());
    }
    Ok(player)
}
