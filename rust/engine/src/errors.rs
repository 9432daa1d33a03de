use thiserror::Error;

use crate::cards::Card;
use crate::game::Stage;

/// Why a bet (or an agent action) was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BetRejection {
    #[error("amount must be a positive integer")]
    NonPositive,
    #[error("amount {amount} exceeds remaining chips {chips}")]
    ExceedsStack { amount: u64, chips: u64 },
    #[error("it's not player {actual}'s turn (expected player {expected})")]
    OutOfTurn { expected: usize, actual: usize },
    #[error("no player at index {index} (table has {players})")]
    UnknownPlayer { index: usize, players: usize },
    #[error("player {index} is not agent-controlled")]
    NotAgentTurn { index: usize },
    #[error("betting is closed at {stage}")]
    BettingClosed { stage: Stage },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet: {0}")]
    InvalidBet(BetRejection),
    #[error("Invalid stage transition: cannot advance past {stage}")]
    InvalidStageTransition { stage: Stage },
    #[error("Not at showdown: current stage is {stage}")]
    NotAtShowdown { stage: Stage },
    #[error("Deck is empty")]
    EmptyDeck,
    #[error("Game has not been initialized")]
    UninitializedGame,
    #[error("Duplicate card in deck: {0}")]
    DuplicateCard(Card),
    #[error("Chip arithmetic overflow")]
    ChipOverflow,
}

impl GameError {
    /// Stable machine-readable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidBet(_) => "invalid_bet",
            GameError::InvalidStageTransition { .. } => "invalid_stage_transition",
            GameError::NotAtShowdown { .. } => "not_at_showdown",
            GameError::EmptyDeck => "empty_deck",
            GameError::UninitializedGame => "uninitialized_game",
            GameError::DuplicateCard(_) => "duplicate_card",
            GameError::ChipOverflow => "chip_overflow",
        }
    }
}

impl From<BetRejection> for GameError {
    fn from(r: BetRejection) -> Self {
        GameError::InvalidBet(r)
    }
}
