use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four suits of a standard deck.
/// Suits carry no ranking; the derived ordering only exists for deterministic sorting.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

/// The face value of a card, Two lowest and Ace highest.
/// Discriminants match the pip value so `rank as u8` is usable in bitmasks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Inverse of `rank as u8`. Returns `None` outside 2..=14.
    pub fn from_u8(v: u8) -> Option<Rank> {
        let i = v.checked_sub(Rank::Two as u8)?;
        RANKS.get(usize::from(i)).copied()
    }

    pub fn glyph(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    fn from_glyph(c: char) -> Option<Rank> {
        all_ranks().into_iter().find(|r| r.glyph() == c.to_ascii_uppercase())
    }
}

impl Suit {
    pub fn glyph(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    fn from_glyph(c: char) -> Option<Suit> {
        all_suits().into_iter().find(|s| s.glyph() == c.to_ascii_lowercase())
    }
}

/// A single playing card.
/// Cards are immutable values; uniqueness within a deck is enforced by [`crate::deck::Deck`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.glyph(), self.suit.glyph())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid card glyph: {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses the two-character form produced by `Display`, e.g. `"Ah"` or `"Td"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError(s.to_string()));
        };
        match (Rank::from_glyph(r), Suit::from_glyph(su)) {
            (Some(rank), Some(suit)) => Ok(Card { rank, suit }),
            _ => Err(ParseCardError(s.to_string())),
        }
    }
}

const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

const RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

pub fn all_suits() -> [Suit; 4] {
    SUITS
}

/// Ascending, Two first.
pub fn all_ranks() -> [Rank; 13] {
    RANKS
}

/// The 13×4 rank/suit product in suit-major order.
pub fn full_deck() -> Vec<Card> {
    SUITS
        .iter()
        .flat_map(|&suit| RANKS.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}
