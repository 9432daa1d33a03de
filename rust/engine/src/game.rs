use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::Player;

/// Progression of a single hand. `Showdown` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Hole cards dealt, no community cards
    PreFlop,
    /// 3 community cards
    Flop,
    /// 4th community card
    Turn,
    /// 5th community card
    River,
    /// Hands are compared and the pot is awarded
    Showdown,
}

impl Stage {
    /// The stage after this one, `None` once at Showdown.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::PreFlop => Some(Stage::Flop),
            Stage::Flop => Some(Stage::Turn),
            Stage::Turn => Some(Stage::River),
            Stage::River => Some(Stage::Showdown),
            Stage::Showdown => None,
        }
    }

    /// Community cards revealed when entering this stage.
    pub fn cards_dealt_on_entry(self) -> usize {
        match self {
            Stage::PreFlop => 0,
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            Stage::Showdown => 0,
        }
    }

    /// Number of community cards on the board during this stage.
    pub fn community_card_count(self) -> usize {
        match self {
            Stage::PreFlop => 0,
            Stage::Flop => 3,
            Stage::Turn => 4,
            Stage::River | Stage::Showdown => 5,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Snapshot of the live hand. Callers only ever receive clones of it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub players: Vec<Player>,
    pub community_cards: Vec<Card>,
    pub pot: u64,
    /// Highest commitment of any player in the current betting round
    pub current_bet: u64,
    pub current_player_index: usize,
    pub stage: Stage,
}

impl GameState {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            community_cards: Vec::with_capacity(5),
            pot: 0,
            current_bet: 0,
            current_player_index: 0,
            stage: Stage::PreFlop,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Chips a player still has to put in to match `current_bet`.
    pub fn to_call(&self, index: usize) -> u64 {
        self.players
            .get(index)
            .map(|p| self.current_bet.saturating_sub(p.current_bet))
            .unwrap_or(0)
    }

    /// Sum of every stack plus the pot, widened so it cannot overflow.
    pub fn total_chips(&self) -> u128 {
        self.players.iter().map(|p| p.chips as u128).sum::<u128>() + self.pot as u128
    }

    /// Every card held by a player or lying on the board.
    pub fn cards_in_play(&self) -> Vec<Card> {
        self.players
            .iter()
            .flat_map(|p| p.hand.iter().copied())
            .chain(self.community_cards.iter().copied())
            .collect()
    }

    pub fn is_terminal(&self) -> bool {
        self.stage == Stage::Showdown
    }
}
