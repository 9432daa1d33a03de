//! # holdem-engine: Texas Hold'em Game Engine
//!
//! A single-hand Texas Hold'em engine for 2 to 10 seats. Drives one hand from
//! the deal through PreFlop, Flop, Turn and River to a Showdown, validates every
//! bet before committing it, and resolves the winner (or a split) with a
//! seven-card evaluator. The default table is heads-up: a human in seat 0
//! against an always-calling agent in seat 1.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and the 52-card product
//! - [`deck`] - Seedable ChaCha20 shuffling and drawing
//! - [`hand`] - Best-five-of-seven evaluation and comparison
//! - [`player`] - Seats, stacks and round commitments
//! - [`game`] - GameState snapshot and the Stage sequence
//! - [`rules`] - Bet validation against the current state
//! - [`agent`] - Pluggable agent strategies
//! - [`engine`] - The state machine owning the live hand
//! - [`showdown`] - Winner resolution and pot distribution
//! - [`service`] - Lock-guarded facade with string errors for presentation layers
//! - [`config`] - Table configuration from TOML and environment
//! - [`logger`] - Hand records and JSONL hand history
//! - [`logging`] - `tracing` subscriber setup and capture
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::hand::{evaluate, Category};
//!
//! let cards = [
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::King, Suit::Hearts),
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//!
//! let rank = evaluate(&cards);
//! assert_eq!(rank.category, Category::StraightFlush);
//! ```
//!
//! ## Playing a Hand
//!
//! ```rust
//! use holdem_engine::config::EngineConfig;
//! use holdem_engine::service::GameService;
//!
//! let service = GameService::new(EngineConfig::heads_up().with_seed(7)).unwrap();
//! service.initialize_game().unwrap();
//! service.place_bet(20).unwrap();
//! let state = service.ai_action().unwrap();
//! assert_eq!(state.pot, 40);
//!
//! for _ in 0..4 {
//!     service.advance_game_state().unwrap();
//! }
//! println!("{}", service.determine_winner().unwrap());
//! ```
//!
//! ## Deterministic Deals
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! assert_eq!(a.draw_n(52).unwrap(), b.draw_n(52).unwrap());
//! ```

pub mod agent;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod logging;
pub mod player;
pub mod rules;
pub mod service;
pub mod showdown;
