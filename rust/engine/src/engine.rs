use std::fmt;

use crate::agent::{create_agent, AgentStrategy};
use crate::config::{ConfigError, EngineConfig};
use crate::deck::Deck;
use crate::errors::{BetRejection, GameError};
use crate::game::GameState;
use crate::logger::{ActionRecord, HandLogger, HandRecord, ShowdownInfo};
use crate::player::{Controller, Player};
use crate::rules::{self, ValidatedAction};
use crate::showdown::{self, ShowdownOutcome};

/// Owns the single live hand and every transition on it.
///
/// Each operation validates against the current state and only then commits a
/// new one, so a rejected call leaves the hand exactly as it was.
///
/// # Examples
///
/// ```
/// use holdem_engine::config::EngineConfig;
/// use holdem_engine::engine::PokerEngine;
/// use holdem_engine::game::Stage;
///
/// let mut engine = PokerEngine::new(EngineConfig::heads_up().with_seed(42)).unwrap();
/// engine.initialize().unwrap();
///
/// // human bets, the agent calls
/// engine.place_bet(0, 20).unwrap();
/// let state = engine.ai_action().unwrap();
/// assert_eq!(state.pot, 40);
///
/// while engine.state().map(|s| s.stage) != Some(Stage::Showdown) {
///     engine.advance_stage().unwrap();
/// }
/// let verdict = engine.determine_winner().unwrap();
/// assert!(!verdict.is_empty());
/// ```
pub struct PokerEngine {
    config: EngineConfig,
    agent: Box<dyn AgentStrategy>,
    logger: HandLogger,
    /// Hands started so far, used to derive per-hand seeds
    hands_dealt: u64,
    live: Option<LiveHand>,
}

#[derive(Debug, Clone)]
struct LiveHand {
    state: GameState,
    deck: Deck,
    record: HandRecord,
    outcome: Option<ShowdownOutcome>,
}

impl fmt::Debug for PokerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PokerEngine")
            .field("config", &self.config)
            .field("agent", &self.agent.name())
            .field("hands_dealt", &self.hands_dealt)
            .field("live", &self.live)
            .finish()
    }
}

impl PokerEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let agent = create_agent(&config.agent).ok_or_else(|| {
            ConfigError::Invalid(format!("unknown agent strategy: {}", config.agent))
        })?;
        Ok(Self {
            config,
            agent,
            logger: HandLogger::detached(),
            hands_dealt: 0,
            live: None,
        })
    }

    /// Replaces the configured strategy for every agent seat.
    pub fn with_agent(mut self, agent: Box<dyn AgentStrategy>) -> Self {
        self.agent = agent;
        self
    }

    /// Finished hands are appended to `logger` when the winner is determined.
    pub fn with_hand_logger(mut self, logger: HandLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    /// Starts a new hand with a freshly shuffled deck, replacing any live hand.
    pub fn initialize(&mut self) -> Result<GameState, GameError> {
        let seed = self.config.seed.map(|s| s.wrapping_add(self.hands_dealt));
        let deck = match seed {
            Some(s) => Deck::new_with_seed(s),
            None => Deck::new_shuffled(),
        };
        self.start_hand(deck, seed)
    }

    /// Starts a new hand dealing from `deck` in order. Hole cards go round-robin
    /// from seat 0, two passes; community cards follow as stages advance.
    pub fn initialize_with_deck(&mut self, deck: Deck) -> Result<GameState, GameError> {
        self.start_hand(deck, None)
    }

    fn start_hand(&mut self, mut deck: Deck, seed: Option<u64>) -> Result<GameState, GameError> {
        let mut players: Vec<Player> = (0..self.config.player_count)
            .map(|i| {
                let controller = if self.config.is_agent_seat(i) {
                    Controller::Agent
                } else {
                    Controller::Human
                };
                Player::new(self.config.starting_stack, controller)
            })
            .collect();
        for _ in 0..2 {
            for p in &mut players {
                p.hand.push(deck.draw()?);
            }
        }
        let state = GameState::new(players);

        let mut record = HandRecord::new(self.logger.next_id(), seed);
        record.hole_cards = state.players.iter().map(|p| p.hand.clone()).collect();

        tracing::info!(
            hand_id = %record.hand_id,
            players = state.player_count(),
            starting_stack = self.config.starting_stack,
            seed = ?seed,
            "hand initialized"
        );

        self.hands_dealt += 1;
        self.live = Some(LiveHand {
            state: state.clone(),
            deck,
            record,
            outcome: None,
        });
        Ok(state)
    }

    /// Commits `amount` chips for the player at `index`, who must be the player to act.
    ///
    /// The turn then passes to the next seat; wrapping back to seat 0 means the
    /// betting round is complete and the caller should advance the stage.
    pub fn place_bet(&mut self, index: usize, amount: u64) -> Result<GameState, GameError> {
        let hand = self.live.as_mut().ok_or(GameError::UninitializedGame)?;
        let action = rules::validate_bet(&hand.state, index, amount)?;
        commit_action(hand, index, action)
    }

    /// Lets the agent seat whose turn it is act according to the engine's strategy.
    pub fn ai_action(&mut self) -> Result<GameState, GameError> {
        let hand = self.live.as_mut().ok_or(GameError::UninitializedGame)?;
        let seat = rules::validate_agent_turn(&hand.state)?;
        let decision = self.agent.decide(&hand.state, seat);
        tracing::debug!(
            hand_id = %hand.record.hand_id,
            seat,
            agent = self.agent.name(),
            decision = ?decision,
            "agent decided"
        );
        let action = rules::validate_decision(&hand.state, seat, decision)?;
        commit_action(hand, seat, action)
    }

    /// Moves to the next stage, dealing its community cards and opening a new
    /// betting round. The pot is untouched.
    pub fn advance_stage(&mut self) -> Result<GameState, GameError> {
        let hand = self.live.as_mut().ok_or(GameError::UninitializedGame)?;
        let stage = hand.state.stage;
        let next_stage = stage
            .next()
            .ok_or(GameError::InvalidStageTransition { stage })?;

        let mut deck = hand.deck.clone();
        let dealt = deck.draw_n(next_stage.cards_dealt_on_entry())?;

        let mut next = hand.state.clone();
        next.community_cards.extend(dealt);
        for p in &mut next.players {
            p.current_bet = 0;
        }
        next.current_bet = 0;
        next.current_player_index = 0;
        next.stage = next_stage;

        tracing::debug!(
            hand_id = %hand.record.hand_id,
            from = %stage,
            to = %next_stage,
            board = next.community_cards.len(),
            "stage advanced"
        );

        hand.record.board = next.community_cards.clone();
        hand.deck = deck;
        hand.state = next;
        Ok(hand.state.clone())
    }

    /// Resolves the showdown, pays the pot out and returns the verdict.
    ///
    /// Once resolved the hand is terminal; calling again returns the same
    /// verdict without moving chips.
    ///
    /// Appending to the hand history is best-effort: a failed write is logged
    /// at `warn` and the verdict still stands.
    pub fn determine_winner(&mut self) -> Result<String, GameError> {
        let hand = self.live.as_mut().ok_or(GameError::UninitializedGame)?;
        if let Some(outcome) = &hand.outcome {
            return Ok(outcome.verdict.clone());
        }

        let outcome = showdown::resolve(&hand.state)?;
        let mut next = hand.state.clone();
        for (p, &award) in next.players.iter_mut().zip(&outcome.awards) {
            p.add_chips(award)?;
        }
        next.pot = 0;

        tracing::info!(
            hand_id = %hand.record.hand_id,
            winners = ?outcome.winners,
            pot = hand.state.pot,
            verdict = %outcome.verdict,
            "showdown resolved"
        );

        hand.record.result = Some(outcome.verdict.clone());
        hand.record.showdown = Some(ShowdownInfo {
            winners: outcome.winners.clone(),
            awards: outcome.awards.clone(),
            notes: outcome.is_split().then(|| "split pot".to_string()),
        });
        if let Err(err) = self.logger.write(&hand.record) {
            tracing::warn!(
                hand_id = %hand.record.hand_id,
                error = %err,
                "failed to append hand history"
            );
        }

        let verdict = outcome.verdict.clone();
        hand.state = next;
        hand.outcome = Some(outcome);
        Ok(verdict)
    }

    pub fn is_initialized(&self) -> bool {
        self.live.is_some()
    }

    /// Snapshot of the live hand, `None` before the first `initialize`.
    pub fn state(&self) -> Option<GameState> {
        self.live.as_ref().map(|h| h.state.clone())
    }

    pub fn outcome(&self) -> Option<&ShowdownOutcome> {
        self.live.as_ref().and_then(|h| h.outcome.as_ref())
    }

    pub fn hand_record(&self) -> Option<&HandRecord> {
        self.live.as_ref().map(|h| &h.record)
    }

    pub fn deck_remaining(&self) -> Option<usize> {
        self.live.as_ref().map(|h| h.deck.remaining())
    }
}

/// Applies an already validated action on a copy of the state and commits it.
fn commit_action(
    hand: &mut LiveHand,
    index: usize,
    action: ValidatedAction,
) -> Result<GameState, GameError> {
    let mut next = hand.state.clone();
    let players = next.player_count();
    if let ValidatedAction::Bet(amount) = action {
        let player = next
            .players
            .get_mut(index)
            .ok_or(BetRejection::UnknownPlayer { index, players })?;
        player.commit(amount)?;
        next.current_bet = next.current_bet.max(player.current_bet);
        next.pot = next
            .pot
            .checked_add(amount)
            .ok_or(GameError::ChipOverflow)?;
    }
    next.current_player_index = (index + 1) % players;

    tracing::debug!(
        hand_id = %hand.record.hand_id,
        player = index,
        action = ?action,
        pot = next.pot,
        round_complete = next.current_player_index == 0,
        "action applied"
    );

    hand.record.actions.push(ActionRecord {
        player_id: index,
        stage: next.stage,
        action,
    });
    hand.state = next;
    Ok(hand.state.clone())
}
