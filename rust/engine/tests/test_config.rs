use std::env;
use std::fs;

use holdem_engine::config::{
    load, ConfigError, EngineConfig, CONFIG_ENV, PLAYERS_ENV, SEED_ENV, STARTING_STACK_ENV,
};
use holdem_engine::engine::PokerEngine;
use serial_test::serial;

fn clear_env() {
    for key in [CONFIG_ENV, SEED_ENV, STARTING_STACK_ENV, PLAYERS_ENV] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn defaults_without_env() {
    clear_env();
    let cfg = load().unwrap();
    assert_eq!(cfg, EngineConfig::heads_up());
}

#[test]
#[serial]
fn env_overrides_apply_on_top_of_the_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holdem.toml");
    fs::write(
        &path,
        "player_count = 4\nstarting_stack = 250\nseed = 1\nagent_seats = [1, 3]\n",
    )
    .unwrap();

    env::set_var(CONFIG_ENV, &path);
    env::set_var(SEED_ENV, "99");
    let cfg = load().unwrap();
    clear_env();

    assert_eq!(cfg.player_count, 4);
    assert_eq!(cfg.starting_stack, 250);
    assert_eq!(cfg.seed, Some(99));
    assert_eq!(cfg.agent_seats, vec![1, 3]);

    let mut e = PokerEngine::new(cfg).unwrap();
    let s = e.initialize().unwrap();
    assert_eq!(s.player_count(), 4);
    assert!(s.players[3].is_agent());
    assert!(s.players.iter().all(|p| p.chips == 250));
}

#[test]
#[serial]
fn invalid_env_values_are_rejected() {
    clear_env();
    env::set_var(SEED_ENV, "not-a-number");
    let err = load().unwrap_err();
    clear_env();
    assert!(matches!(err, ConfigError::Invalid(_)));

    env::set_var(PLAYERS_ENV, "11");
    let err = load().unwrap_err();
    clear_env();
    assert!(err.to_string().contains("player_count"));

    env::set_var(STARTING_STACK_ENV, "0");
    assert!(load().is_err());
    clear_env();
}

#[test]
#[serial]
fn missing_config_file_is_an_io_error() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    env::set_var(CONFIG_ENV, dir.path().join("absent.toml"));
    let err = load().unwrap_err();
    clear_env();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn from_file_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "agent_seats = [5]\n").unwrap();
    assert!(matches!(
        EngineConfig::from_file(&path),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn engine_refuses_an_invalid_config() {
    assert!(PokerEngine::new(EngineConfig::multi_player(1)).is_err());
}
