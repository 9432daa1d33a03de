use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        };
        f.write_str(s)
    }
}

/// Strength of the best five-card hand.
///
/// Field order matters: the derived `Ord` compares `category` first and then
/// `tiebreak` lexicographically, most significant rank first. Two hands of the
/// same category always carry tiebreaks of the same length.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub tiebreak: Vec<Rank>,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)?;
        if let Some(top) = self.tiebreak.first() {
            write!(f, " ({:?} high)", top)?;
        }
        Ok(())
    }
}

/// Evaluates the best five-card hand contained in `cards` (hole + community).
///
/// Intended for 5 to 7 distinct cards; fewer cards still evaluate but leave the
/// tiebreak short.
pub fn evaluate(cards: &[Card]) -> HandRank {
    debug_assert!(cards.len() <= 7, "evaluate expects at most 7 cards");

    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let mut suit_masks = [0u16; 4];
    for c in cards {
        let r = c.rank as usize;
        rank_counts[r] += 1;
        rank_mask |= 1 << r;
        suit_masks[suit_index(c.suit)] |= 1 << r;
    }

    let flush_mask = suit_masks.iter().copied().find(|m| m.count_ones() >= 5);

    if let Some(m) = flush_mask {
        if let Some(high) = straight_high(m) {
            return rank(Category::StraightFlush, vec![high]);
        }
    }

    let quads = ranks_with_count(&rank_counts, 4);
    let trips = ranks_with_count(&rank_counts, 3);
    let pairs = ranks_with_count(&rank_counts, 2);

    if let Some(&q) = quads.first() {
        let mut tb = vec![q];
        tb.extend(kickers(&rank_counts, &[q], 1));
        return rank(Category::FourOfAKind, tb);
    }

    if let Some(&t) = trips.first() {
        // a second set of trips plays as the pair
        if let Some(&p) = trips.get(1).or(pairs.first()) {
            return rank(Category::FullHouse, vec![t, p]);
        }
    }

    if let Some(m) = flush_mask {
        return rank(Category::Flush, ranks_in_mask(m).into_iter().take(5).collect());
    }

    if let Some(high) = straight_high(rank_mask) {
        return rank(Category::Straight, vec![high]);
    }

    if let Some(&t) = trips.first() {
        let mut tb = vec![t];
        tb.extend(kickers(&rank_counts, &[t], 2));
        return rank(Category::ThreeOfAKind, tb);
    }

    if let [high, low, ..] = pairs[..] {
        // a third pair can still play as the kicker
        let mut tb = vec![high, low];
        tb.extend(kickers(&rank_counts, &[high, low], 1));
        return rank(Category::TwoPair, tb);
    }

    if let Some(&p) = pairs.first() {
        let mut tb = vec![p];
        tb.extend(kickers(&rank_counts, &[p], 3));
        return rank(Category::Pair, tb);
    }

    rank(Category::HighCard, kickers(&rank_counts, &[], 5))
}

pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    a.cmp(b)
}

fn rank(category: Category, tiebreak: Vec<Rank>) -> HandRank {
    HandRank { category, tiebreak }
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// Ranks appearing exactly `count` times, highest first.
fn ranks_with_count(rank_counts: &[u8; 15], count: u8) -> Vec<Rank> {
    (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] == count)
        .filter_map(Rank::from_u8)
        .collect()
}

/// Up to `n` highest present ranks not in `exclude`.
fn kickers(rank_counts: &[u8; 15], exclude: &[Rank], n: usize) -> Vec<Rank> {
    (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .filter_map(Rank::from_u8)
        .filter(|r| !exclude.contains(r))
        .take(n)
        .collect()
}

fn ranks_in_mask(mask: u16) -> Vec<Rank> {
    (2..=14u8)
        .rev()
        .filter(|&r| mask & (1 << r) != 0)
        .filter_map(Rank::from_u8)
        .collect()
}

/// Highest card of the best straight in `mask`, if any.
fn straight_high(mask: u16) -> Option<Rank> {
    let mut m = mask;
    // Ace also plays low, which only matters for the wheel
    if m & (1 << 14) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to Five
    for high in (5..=14u8).rev() {
        let window = 0b11111u16 << (high - 4);
        if m & window == window {
            return Rank::from_u8(high);
        }
    }
    None
}
