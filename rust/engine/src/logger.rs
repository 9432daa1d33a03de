use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Stage;
use crate::rules::ValidatedAction;

/// One applied action, in the order it was committed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: usize,
    pub stage: Stage,
    pub action: ValidatedAction,
}

/// Audit record of one hand, written as a single JSON line once the winner is known.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// `YYYYMMDD-NNNNNN`
    pub hand_id: String,
    /// Seed the deck was shuffled with; `None` for entropy or injected decks
    pub seed: Option<u64>,
    pub actions: Vec<ActionRecord>,
    /// Hole cards by seat index
    #[serde(default)]
    pub hole_cards: Vec<Vec<Card>>,
    pub board: Vec<Card>,
    /// Showdown verdict
    pub result: Option<String>,
    /// RFC3339, filled in on write when absent
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

impl HandRecord {
    pub fn new(hand_id: String, seed: Option<u64>) -> Self {
        Self {
            hand_id,
            seed,
            actions: Vec::new(),
            hole_cards: Vec::new(),
            board: Vec::new(),
            result: None,
            ts: None,
            showdown: None,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub winners: Vec<usize>,
    /// Chips paid out, by seat index
    #[serde(default)]
    pub awards: Vec<u64>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{yyyymmdd}-{seq:06}")
}

/// Issues hand ids and appends finished hands to a JSONL file.
///
/// A detached logger still issues ids but writes nothing.
#[derive(Debug)]
pub struct HandLogger {
    sink: Option<File>,
    date: String,
    seq: u32,
}

impl HandLogger {
    /// Opens `path` for appending, creating the file and missing parent directories.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)?,
            _ => {}
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            sink: Some(file),
            ..Self::detached()
        })
    }

    pub fn detached() -> Self {
        Self::with_date(&Utc::now().format("%Y%m%d").to_string())
    }

    /// Detached logger whose ids use a fixed date.
    pub fn with_date(date: &str) -> Self {
        Self {
            sink: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    /// Appends `record` as one LF-terminated line, stamping `ts` if it is unset.
    ///
    /// The line is serialized in full and handed to the file in a single append,
    /// so nothing is written when serialization fails.
    pub fn write(&mut self, record: &HandRecord) -> io::Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        let mut line = if record.ts.is_some() {
            serde_json::to_string(record)
        } else {
            let mut stamped = record.clone();
            stamped.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
            serde_json::to_string(&stamped)
        }
        .map_err(io::Error::other)?;
        line.push('\n');
        sink.write_all(line.as_bytes())
    }
}
