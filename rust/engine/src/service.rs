//! The operations a presentation layer calls, with plain-string errors.
//!
//! [`GameService`] owns one [`PokerEngine`] behind a `RwLock`: every mutating
//! call holds the write lock for its whole transition, so mutations are
//! serialized even if the host runtime overlaps calls, and `get_game_state`
//! readers never observe a half-applied change.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::{ConfigError, EngineConfig};
use crate::engine::PokerEngine;
use crate::errors::{BetRejection, GameError};
use crate::game::GameState;

/// Seat acting through the heads-up form of `place_bet`.
pub const HERO_SEAT: usize = 0;

#[derive(Debug)]
pub struct GameService {
    engine: RwLock<PokerEngine>,
}

impl GameService {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_engine(PokerEngine::new(config)?))
    }

    pub fn from_engine(engine: PokerEngine) -> Self {
        Self {
            engine: RwLock::new(engine),
        }
    }

    /// Deals a new hand, replacing the previous one.
    ///
    /// Cannot fail for a validated configuration; the `Result` only carries the
    /// deck-exhaustion defect through the same channel as every other call.
    pub fn initialize_game(&self) -> Result<GameState, String> {
        self.mutate("initialize_game", |e| e.initialize())
    }

    /// Heads-up bet by the human seat.
    pub fn place_bet(&self, amount: i64) -> Result<GameState, String> {
        self.place_bet_for(HERO_SEAT as u64, amount)
    }

    pub fn place_bet_for(&self, player_index: u64, amount: i64) -> Result<GameState, String> {
        self.mutate("place_bet", |e| {
            if !e.is_initialized() {
                return Err(GameError::UninitializedGame);
            }
            let amount = u64::try_from(amount).map_err(|_| BetRejection::NonPositive)?;
            // out-of-range indices are reported as an unknown seat by the engine
            let index = usize::try_from(player_index).unwrap_or(usize::MAX);
            e.place_bet(index, amount)
        })
    }

    pub fn advance_game_state(&self) -> Result<GameState, String> {
        self.mutate("advance_game_state", |e| e.advance_stage())
    }

    pub fn ai_action(&self) -> Result<GameState, String> {
        self.mutate("ai_action", |e| e.ai_action())
    }

    pub fn determine_winner(&self) -> Result<String, String> {
        self.mutate("determine_winner", |e| e.determine_winner())
    }

    pub fn get_game_state(&self) -> Option<GameState> {
        self.read().state()
    }

    fn mutate<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut PokerEngine) -> Result<T, GameError>,
    ) -> Result<T, String> {
        let mut engine = self.write();
        f(&mut *engine).map_err(|err| {
            tracing::warn!(op, code = err.code(), error = %err, "operation rejected");
            err.to_string()
        })
    }

    // Transitions commit a fully built state or nothing, so a poisoned lock
    // still guards a consistent engine.
    fn read(&self) -> RwLockReadGuard<'_, PokerEngine> {
        self.engine.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PokerEngine> {
        self.engine.write().unwrap_or_else(PoisonError::into_inner)
    }
}
