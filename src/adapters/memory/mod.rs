//! In-memory adapters for deterministic tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::error::{AlertError, StoreError};
use crate::ports::alerts::{AlertSink, Urgency};
use crate::ports::clock::Clock;
use crate::ports::id_gen::IdGenerator;
use crate::ports::page::{PageSource, TextFragment};
use crate::ports::store::{TaskSnapshot, TaskStore};
use crate::task::Task;

/// Versioned in-memory task store with real compare-and-swap semantics.
///
/// Behaves exactly like the file-backed store minus the I/O, so the
/// read-decide-write discipline is exercised by every test that touches it.
pub struct MemoryTaskStore {
    state: Mutex<(Vec<Task>, u64)>,
}

impl MemoryTaskStore {
    /// Creates an empty store at version 0.
    #[must_use]
    pub fn new() -> Self {
        Self { state: Mutex::new((Vec::new(), 0)) }
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore for MemoryTaskStore {
    fn snapshot(&self) -> Result<TaskSnapshot, StoreError> {
        let state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(TaskSnapshot { tasks: state.0.clone(), version: state.1 })
    }

    fn commit(&self, tasks: Vec<Task>, expected_version: u64) -> Result<u64, StoreError> {
        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if state.1 != expected_version {
            return Err(StoreError::Conflict { expected: expected_version, actual: state.1 });
        }
        state.0 = tasks;
        state.1 += 1;
        Ok(state.1)
    }
}

/// Clock pinned to a fixed instant.
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock that always reports `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Sequential ID generator: `task_1`, `task_2`, ...
pub struct SeqIdGenerator {
    next: AtomicU64,
}

impl SeqIdGenerator {
    /// Creates a generator starting at `task_1`.
    #[must_use]
    pub fn new() -> Self {
        Self { next: AtomicU64::new(1) }
    }
}

impl Default for SeqIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SeqIdGenerator {
    fn generate_id(&self) -> String {
        format!("task_{}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// Page source over a fixed block of text, one fragment per line.
pub struct StaticPage {
    fragments: Vec<TextFragment>,
    url: Option<String>,
    title: String,
}

impl StaticPage {
    /// Creates a page serving `text` line by line, all content.
    #[must_use]
    pub fn new(text: &str, url: &str, title: &str) -> Self {
        let fragments = text
            .lines()
            .enumerate()
            .map(|(i, line)| TextFragment {
                text: line.to_string(),
                source_ref: format!("line:{}", i + 1),
                is_content: true,
            })
            .collect();
        Self { fragments, url: Some(url.to_string()), title: title.to_string() }
    }

    /// Creates a page from explicit fragments, for segmentation tests.
    #[must_use]
    pub fn from_fragments(fragments: Vec<TextFragment>, title: &str) -> Self {
        Self { fragments, url: None, title: title.to_string() }
    }
}

impl PageSource for StaticPage {
    fn fragments(&self) -> Vec<TextFragment> {
        self.fragments.clone()
    }

    fn url(&self) -> Option<String> {
        self.url.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}

/// Alert sink that records every notification instead of delivering it.
pub struct RecordingAlertSink {
    sent: Mutex<Vec<(String, String, Urgency)>>,
}

impl RecordingAlertSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self { sent: Mutex::new(Vec::new()) }
    }

    /// Returns the notifications recorded so far, in delivery order.
    #[must_use]
    pub fn sent(&self) -> Vec<(String, String, Urgency)> {
        self.sent.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}

impl Default for RecordingAlertSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertSink for RecordingAlertSink {
    fn notify(&self, title: &str, message: &str, urgency: Urgency) -> Result<(), AlertError> {
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((title.to_string(), message.to_string(), urgency));
        Ok(())
    }
}
