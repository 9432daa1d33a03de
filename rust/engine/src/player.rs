use crate::cards::Card;
use crate::errors::{BetRejection, GameError};
use serde::{Deserialize, Serialize};

/// Who issues a seat's actions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    /// Acts through `place_bet`
    Human,
    /// Acts through `ai_action` using the engine's agent strategy
    Agent,
}

/// A seat at the table: hole cards, chip stack and this round's commitment.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Hole cards (0 to 2)
    pub hand: Vec<Card>,
    /// Remaining chip stack
    pub chips: u64,
    /// Chips committed during the current betting round
    pub current_bet: u64,
    pub controller: Controller,
}

impl Player {
    pub fn new(chips: u64, controller: Controller) -> Self {
        Self {
            hand: Vec::with_capacity(2),
            chips,
            current_bet: 0,
            controller,
        }
    }

    pub fn is_agent(&self) -> bool {
        self.controller == Controller::Agent
    }

    /// Moves `amount` out of the stack into this round's commitment.
    pub fn commit(&mut self, amount: u64) -> Result<(), GameError> {
        if amount > self.chips {
            return Err(BetRejection::ExceedsStack {
                amount,
                chips: self.chips,
            }
            .into());
        }
        self.current_bet = self
            .current_bet
            .checked_add(amount)
            .ok_or(GameError::ChipOverflow)?;
        self.chips -= amount;
        Ok(())
    }

    pub fn add_chips(&mut self, amount: u64) -> Result<(), GameError> {
        self.chips = self
            .chips
            .checked_add(amount)
            .ok_or(GameError::ChipOverflow)?;
        Ok(())
    }
}
