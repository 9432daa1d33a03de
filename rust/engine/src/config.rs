use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::agent::KNOWN_AGENTS;

/// Env var naming a TOML file to load.
pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const STARTING_STACK_ENV: &str = "HOLDEM_STARTING_STACK";
pub const PLAYERS_ENV: &str = "HOLDEM_PLAYERS";

/// 5 community cards plus 2 per player must fit in one deck.
pub const MAX_PLAYERS: usize = 10;

/// Table setup used by every `initialize`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    pub player_count: usize,
    pub starting_stack: u64,
    /// Base seed; hand `k` is shuffled with `seed + k`. `None` uses OS entropy.
    pub seed: Option<u64>,
    /// Seats acting through `ai_action`
    pub agent_seats: Vec<usize>,
    /// Strategy name understood by [`crate::agent::create_agent`]
    pub agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::heads_up()
    }
}

impl EngineConfig {
    /// Human in seat 0 against an always-calling agent in seat 1, 100 chips each.
    pub fn heads_up() -> Self {
        Self {
            player_count: 2,
            starting_stack: 100,
            seed: None,
            agent_seats: vec![1],
            agent: "always_call".into(),
        }
    }

    /// `n` human seats, no agents.
    pub fn multi_player(n: usize) -> Self {
        Self {
            player_count: n,
            agent_seats: vec![],
            ..Self::heads_up()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_starting_stack(mut self, chips: u64) -> Self {
        self.starting_stack = chips;
        self
    }

    pub fn is_agent_seat(&self, index: usize) -> bool {
        self.agent_seats.contains(&index)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::Invalid(format!(
                "player_count must be between 2 and {MAX_PLAYERS}"
            )));
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::Invalid("starting_stack must be >0".into()));
        }
        if let Some(&seat) = self.agent_seats.iter().find(|&&s| s >= self.player_count) {
            return Err(ConfigError::Invalid(format!(
                "agent seat {seat} is outside the table"
            )));
        }
        if !KNOWN_AGENTS.contains(&self.agent.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unknown agent strategy: {}",
                self.agent
            )));
        }
        Ok(())
    }

    /// Applies the fields present in a TOML document on top of `self`.
    pub fn merge_toml(mut self, s: &str) -> Result<Self, ConfigError> {
        let f: FileConfig = toml::from_str(s)?;
        if let Some(v) = f.player_count {
            self.player_count = v;
        }
        if let Some(v) = f.starting_stack {
            self.starting_stack = v;
        }
        if let Some(v) = f.seed {
            self.seed = Some(v);
        }
        if let Some(v) = f.agent_seats {
            self.agent_seats = v;
        }
        if let Some(v) = f.agent {
            self.agent = v;
        }
        Ok(self)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        let cfg = Self::default().merge_toml(&s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Defaults, then the file named by `HOLDEM_CONFIG`, then env overrides.
pub fn load() -> Result<EngineConfig, ConfigError> {
    let mut cfg = EngineConfig::default();

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        cfg = cfg.merge_toml(&s)?;
    }

    if let Some(seed) = env_value(SEED_ENV) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
    }
    if let Some(stack) = env_value(STARTING_STACK_ENV) {
        cfg.starting_stack = stack
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting stack".into()))?;
    }
    if let Some(players) = env_value(PLAYERS_ENV) {
        cfg.player_count = players
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid player count".into()))?;
    }

    cfg.validate()?;
    Ok(cfg)
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    player_count: Option<usize>,
    #[serde(default)]
    starting_stack: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    agent_seats: Option<Vec<usize>>,
    #[serde(default)]
    agent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heads_up_defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.player_count, 2);
        assert!(cfg.is_agent_seat(1));
        assert!(!cfg.is_agent_seat(0));
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = EngineConfig::default()
            .merge_toml("starting_stack = 500\nseed = 7\n")
            .unwrap();
        assert_eq!(cfg.starting_stack, 500);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.agent_seats, vec![1]);
    }

    #[test]
    fn unknown_keys_are_a_parse_error() {
        let err = EngineConfig::default()
            .merge_toml("blinds = 2\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validation_rejects_bad_tables() {
        assert!(EngineConfig::multi_player(1).validate().is_err());
        assert!(EngineConfig::multi_player(11).validate().is_err());
        assert!(EngineConfig::multi_player(10).validate().is_ok());
        assert!(EngineConfig::heads_up()
            .with_starting_stack(0)
            .validate()
            .is_err());

        let mut cfg = EngineConfig::heads_up();
        cfg.agent_seats = vec![2];
        assert!(cfg.validate().is_err());

        let mut cfg = EngineConfig::heads_up();
        cfg.agent = "gto".into();
        let msg = cfg.validate().unwrap_err().to_string();
        assert!(msg.contains("unknown agent strategy"));
    }
}
