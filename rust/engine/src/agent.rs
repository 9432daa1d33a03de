//! Decision strategies for agent-controlled seats.
//!
//! The engine asks its [`AgentStrategy`] what an agent seat does whenever
//! `ai_action` is invoked, then applies the answer exactly like a bet placed
//! by that seat. New opponents are new implementations of the trait; the state
//! machine does not change.

use crate::game::GameState;

/// What an agent seat chooses to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentDecision {
    /// Put nothing in and pass the turn
    Check,
    /// Put this many chips into the pot
    Bet(u64),
}

/// Interface for opposing-agent policies.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_engine::agent::{AgentDecision, AgentStrategy};
/// use holdem_engine::game::GameState;
///
/// struct AlwaysCheck;
///
/// impl AgentStrategy for AlwaysCheck {
///     fn decide(&self, _state: &GameState, _seat: usize) -> AgentDecision {
///         AgentDecision::Check
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysCheck"
///     }
/// }
/// ```
pub trait AgentStrategy: Send + Sync {
    /// Decide the action for `seat` given a snapshot of the hand.
    /// Returned bets are validated like any other bet; an illegal one is rejected.
    fn decide(&self, state: &GameState, seat: usize) -> AgentDecision;

    fn name(&self) -> &str;
}

/// Fixed, non-adaptive policy: match whatever is outstanding.
///
/// Calls are capped at the remaining stack. With nothing to match, or nothing
/// left to bet, it checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCall;

impl AgentStrategy for AlwaysCall {
    fn decide(&self, state: &GameState, seat: usize) -> AgentDecision {
        let chips = state.players.get(seat).map(|p| p.chips).unwrap_or(0);
        match state.to_call(seat).min(chips) {
            0 => AgentDecision::Check,
            amount => AgentDecision::Bet(amount),
        }
    }

    fn name(&self) -> &str {
        "AlwaysCall"
    }
}

/// Names accepted by [`create_agent`].
pub const KNOWN_AGENTS: &[&str] = &["always_call", "call"];

/// Builds a strategy from its configuration name, `None` if the name is unknown.
///
/// ```rust
/// use holdem_engine::agent::create_agent;
///
/// let agent = create_agent("always_call").unwrap();
/// assert_eq!(agent.name(), "AlwaysCall");
/// assert!(create_agent("gto").is_none());
/// ```
pub fn create_agent(name: &str) -> Option<Box<dyn AgentStrategy>> {
    match name {
        "always_call" | "call" => Some(Box::new(AlwaysCall)),
        _ => None,
    }
}
