use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// The cards of one hand, drawn from the top in order.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// A full deck shuffled with a ChaCha20 stream seeded from OS entropy.
    pub fn new_shuffled() -> Self {
        let mut rng = ChaCha20Rng::from_os_rng();
        Self::shuffled_with(&mut rng)
    }

    /// A full deck whose order depends only on `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::shuffled_with(&mut rng)
    }

    /// A deck that deals `cards` front to back. Used to stack hands in tests;
    /// the order may be shorter than 52 cards but must not repeat a card.
    pub fn from_order(cards: Vec<Card>) -> Result<Self, GameError> {
        let mut seen = HashSet::with_capacity(cards.len());
        for &c in &cards {
            if !seen.insert(c) {
                return Err(GameError::DuplicateCard(c));
            }
        }
        Ok(Self { cards, position: 0 })
    }

    fn shuffled_with(rng: &mut ChaCha20Rng) -> Self {
        let mut cards = full_deck();
        cards.shuffle(rng);
        Self { cards, position: 0 }
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let c = *self.cards.get(self.position).ok_or(GameError::EmptyDeck)?;
        self.position += 1;
        Ok(c)
    }

    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        (0..n).map(|_| self.draw()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
