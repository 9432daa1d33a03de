//! `tracing` setup for hosts and an in-memory capture for assertions.
//!
//! The engine only emits events; installing a subscriber is the host's call.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Registry;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,holdem_engine=debug";

/// One captured event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

impl LogEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// A layer that keeps every event it sees. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct TestLogSubscriber {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.buffer().clone()
    }

    pub fn clear(&self) {
        self.buffer().clear();
    }

    /// Runs `f` with this capture as the thread's default subscriber.
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = Registry::default().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> Layer<S> for TestLogSubscriber
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = EventFields::default();
        event.record(&mut fields);

        let meta = event.metadata();
        self.buffer().push(LogEntry {
            level: *meta.level(),
            target: meta.target().to_string(),
            message: fields.message.unwrap_or_default(),
            fields: fields.values,
        });
    }
}

#[derive(Default)]
struct EventFields {
    message: Option<String>,
    values: BTreeMap<String, String>,
}

impl EventFields {
    fn insert(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            name => {
                self.values.insert(name.to_string(), value);
            }
        }
    }
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }
}

/// Installs a global fmt subscriber filtered by `RUST_LOG`, or [`DEFAULT_FILTER`].
///
/// Fails when the host has already installed a global subscriber.
pub fn init_logging() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info, warn};

    #[test]
    fn captures_levels_messages_and_fields() {
        let logs = TestLogSubscriber::new();
        logs.capture(|| {
            debug!("debug message");
            info!(hand_id = "20250101-000001", players = 2, "hand initialized");
            warn!("warn message");
        });

        let entries = logs.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, Level::DEBUG);
        assert_eq!(entries[1].level, Level::INFO);
        assert_eq!(entries[1].message, "hand initialized");
        assert_eq!(entries[1].field("hand_id"), Some("20250101-000001"));
        assert_eq!(entries[1].field("players"), Some("2"));
        assert_eq!(entries[2].level, Level::WARN);
    }

    #[test]
    fn clones_share_one_buffer() {
        let logs = TestLogSubscriber::new();
        let other = logs.clone();
        other.capture(|| info!("first message"));
        assert_eq!(logs.entries().len(), 1);
        logs.clear();
        assert!(other.entries().is_empty());
    }
}
