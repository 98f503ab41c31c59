//! Shared test doubles for the fetch and notify seams.

use crate::core::{ReminderError, Result};
use crate::features::notifications::NotifyBackend;
use crate::features::reminders::{PageSource, RawPage};
use async_trait::async_trait;
use log::{LevelFilter, Log, Metadata, Record};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, Once};
use std::time::Duration;
use tokio::time::Instant;

/// Assert the gaps between consecutive instants match `expected` seconds.
///
/// Intended for `start_paused` tests, where sleeps advance the clock exactly;
/// a small tolerance absorbs timer-wheel rounding.
pub(crate) fn assert_waits(instants: &[Instant], expected: &[u64]) {
    let observed: Vec<Duration> = instants.windows(2).map(|w| w[1] - w[0]).collect();
    assert_eq!(
        observed.len(),
        expected.len(),
        "observed waits: {observed:?}"
    );
    for (got, want) in observed.iter().zip(expected) {
        let want = Duration::from_secs(*want);
        assert!(
            *got >= want && *got < want + Duration::from_millis(50),
            "expected ~{want:?}, got {got:?} (all: {observed:?})"
        );
    }
}

static CAPTURED_LOGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
static INSTALL_LOGGER: Once = Once::new();

/// Process-wide logger that keeps every formatted message in memory
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED_LOGS
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.args().to_string());
    }

    fn flush(&self) {}
}

/// Route `log` output into memory for the rest of the test binary
pub(crate) fn capture_logs() {
    INSTALL_LOGGER.call_once(|| {
        if log::set_logger(&CaptureLogger).is_ok() {
            log::set_max_level(LevelFilter::Debug);
        }
    });
}

/// Captured messages containing `marker` (e.g. a run id), in order
pub(crate) fn logged_lines(marker: &str) -> Vec<String> {
    CAPTURED_LOGS
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .filter(|line| line.contains(marker))
        .cloned()
        .collect()
}

/// Build a page from a JSON `properties` object
pub(crate) fn page(id: &str, properties: Value) -> RawPage {
    RawPage {
        id: id.to_string(),
        url: format!("https://www.notion.so/{id}"),
        properties: properties.as_object().cloned().unwrap_or_default(),
    }
}

/// Page source that replays a script of responses, one per query
pub(crate) struct MockSource {
    script: Mutex<VecDeque<Result<Vec<RawPage>>>>,
    calls: Mutex<Vec<Instant>>,
}

impl MockSource {
    pub(crate) fn new(script: Vec<Result<Vec<RawPage>>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for MockSource {
    async fn query_pending(&self) -> Result<Vec<RawPage>> {
        self.calls.lock().unwrap().push(Instant::now());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ReminderError::Transport("script exhausted".to_string())))
    }
}

/// Notify backend that fails a fixed number of times before succeeding
pub(crate) struct MockBackend {
    failures_left: Mutex<u32>,
    calls: Mutex<Vec<(Instant, Vec<String>)>>,
}

impl MockBackend {
    pub(crate) fn failing_first(failures: u32) -> Self {
        Self {
            failures_left: Mutex::new(failures),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn succeeding() -> Self {
        Self::failing_first(0)
    }

    pub(crate) fn always_failing() -> Self {
        Self::failing_first(u32::MAX)
    }

    pub(crate) fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub(crate) fn call_args(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, args)| args.clone())
            .collect()
    }
}

#[async_trait]
impl NotifyBackend for MockBackend {
    async fn send(&self, args: &[String]) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), args.to_vec()));

        let mut failures_left = self.failures_left.lock().unwrap();
        if *failures_left > 0 {
            *failures_left -= 1;
            return Err(ReminderError::Notifier(
                "notify-send exited with exit status: 1".to_string(),
            ));
        }
        Ok(())
    }
}
