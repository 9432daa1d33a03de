use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::{GameState, Stage};
use crate::hand::{evaluate, HandRank};

/// Result of comparing every player's best hand at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownOutcome {
    /// Indices of the players holding the best hand, ascending
    pub winners: Vec<usize>,
    /// Best hand of every player, by seat index
    pub hands: Vec<HandRank>,
    /// Chips each seat receives from the pot, by seat index
    pub awards: Vec<u64>,
    pub verdict: String,
}

impl ShowdownOutcome {
    pub fn is_split(&self) -> bool {
        self.winners.len() > 1
    }
}

/// Ranks every hand at showdown and splits the pot among the best.
///
/// A unique best hand takes the whole pot. Tied hands share it evenly; the
/// chips left over by integer division all go to the lowest-indexed winner.
/// This only computes the outcome; the engine applies `awards`.
pub fn resolve(state: &GameState) -> Result<ShowdownOutcome, GameError> {
    match state.stage {
        Stage::Showdown => {}
        stage @ (Stage::PreFlop | Stage::Flop | Stage::Turn | Stage::River) => {
            return Err(GameError::NotAtShowdown { stage });
        }
    }

    let hands: Vec<HandRank> = state
        .players
        .iter()
        .map(|p| {
            let mut cards = p.hand.clone();
            cards.extend_from_slice(&state.community_cards);
            evaluate(&cards)
        })
        .collect();

    let Some(best) = hands.iter().max().cloned() else {
        return Ok(ShowdownOutcome {
            winners: vec![],
            hands,
            awards: vec![],
            verdict: "No players at showdown".to_string(),
        });
    };
    let winners: Vec<usize> = hands
        .iter()
        .enumerate()
        .filter(|(_, h)| **h == best)
        .map(|(i, _)| i)
        .collect();

    let share = state.pot / winners.len() as u64;
    let remainder = state.pot % winners.len() as u64;
    let mut awards = vec![0u64; state.player_count()];
    for &w in &winners {
        awards[w] = share;
    }
    awards[winners[0]] += remainder;

    let verdict = if let [winner] = winners[..] {
        format!(
            "{} wins {} chips with {}",
            seat_label(state, winner),
            state.pot,
            best.category
        )
    } else {
        let names: Vec<String> = winners.iter().map(|&w| seat_label(state, w)).collect();
        let mut v = format!(
            "Split pot: {} tie with {}, {} chips each",
            join_names(&names),
            best.category,
            share
        );
        if remainder > 0 {
            v.push_str(&format!(
                ", {} receives the odd {} chip(s)",
                names[0], remainder
            ));
        }
        v
    };

    Ok(ShowdownOutcome {
        winners,
        hands,
        awards,
        verdict,
    })
}

fn seat_label(state: &GameState, index: usize) -> String {
    match state.players.get(index) {
        Some(p) if p.is_agent() => format!("Player {} (AI)", index),
        _ => format!("Player {}", index),
    }
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
