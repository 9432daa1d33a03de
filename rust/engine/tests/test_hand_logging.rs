use std::fs;

use holdem_engine::cards::Card;
use holdem_engine::config::EngineConfig;
use holdem_engine::engine::PokerEngine;
use holdem_engine::game::Stage;
use holdem_engine::logger::{format_hand_id, ActionRecord, HandLogger, HandRecord};
use holdem_engine::rules::ValidatedAction;

fn play_hand(e: &mut PokerEngine) {
    e.initialize().unwrap();
    e.place_bet(0, 20).unwrap();
    e.ai_action().unwrap();
    for _ in 0..4 {
        e.advance_stage().unwrap();
    }
    e.determine_winner().unwrap();
}

#[test]
fn writes_jsonl_with_lf_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");

    let mut rec = HandRecord::new("20250102-000001".to_string(), Some(1));
    rec.actions.push(ActionRecord {
        player_id: 0,
        stage: Stage::PreFlop,
        action: ValidatedAction::Bet(20),
    });
    rec.board.push("Ac".parse::<Card>().unwrap());
    rec.result = Some("Player 0 wins 40 chips with Pair".to_string());
    logger.write(&rec).expect("write");

    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
}

#[test]
fn sequential_ids_increment() {
    let mut logger = HandLogger::with_date("20251231");
    assert_eq!(logger.next_id(), "20251231-000001");
    assert_eq!(logger.next_id(), "20251231-000002");
    assert_eq!(format_hand_id("20251231", 42), "20251231-000042");
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ts.jsonl");
    let mut logger = HandLogger::create(&path).unwrap();

    let fresh = HandRecord::new("20250102-000001".to_string(), None);
    let mut stamped = HandRecord::new("20250102-000002".to_string(), None);
    stamped.ts = Some("2025-01-02T03:04:05Z".to_string());
    logger.write(&fresh).unwrap();
    logger.write(&stamped).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: HandRecord = serde_json::from_str(lines[0]).unwrap();
    let second: HandRecord = serde_json::from_str(lines[1]).unwrap();
    assert!(first.ts.is_some());
    assert_eq!(second.ts.as_deref(), Some("2025-01-02T03:04:05Z"));
}

#[test]
fn creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("hands.jsonl");
    HandLogger::create(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn engine_appends_each_finished_hand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.jsonl");
    let logger = HandLogger::create(&path).unwrap();
    let mut e = PokerEngine::new(EngineConfig::heads_up().with_seed(77))
        .unwrap()
        .with_hand_logger(logger);

    play_hand(&mut e);
    // a repeated verdict does not append again
    e.determine_winner().unwrap();
    play_hand(&mut e);

    let content = fs::read_to_string(&path).unwrap();
    let records: Vec<HandRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert!(first.hand_id.ends_with("-000001"));
    assert!(records[1].hand_id.ends_with("-000002"));
    assert_eq!(first.seed, Some(77));
    assert_eq!(records[1].seed, Some(78));
    assert_eq!(first.actions.len(), 2);
    assert_eq!(first.hole_cards.len(), 2);
    assert_eq!(first.board.len(), 5);
    assert!(first.result.is_some());
    assert!(first.ts.is_some());
    let showdown = first.showdown.as_ref().unwrap();
    assert!(!showdown.winners.is_empty());
    assert_eq!(showdown.awards.iter().sum::<u64>(), 40);
}

#[cfg(target_os = "linux")]
#[test]
fn failed_history_append_keeps_the_verdict() {
    use holdem_engine::logging::TestLogSubscriber;
    use tracing::Level;

    // every write to /dev/full fails with ENOSPC
    let logger = HandLogger::create("/dev/full").unwrap();
    let mut e = PokerEngine::new(EngineConfig::heads_up().with_seed(12))
        .unwrap()
        .with_hand_logger(logger);

    let logs = TestLogSubscriber::new();
    logs.capture(|| play_hand(&mut e));

    let s = e.state().unwrap();
    assert!(e.outcome().is_some());
    assert_eq!(s.pot, 0);
    assert_eq!(s.total_chips(), 200);
    let warn = logs
        .entries()
        .into_iter()
        .find(|en| en.message == "failed to append hand history")
        .expect("warn event");
    assert_eq!(warn.level, Level::WARN);
}
