//! Service context bundling all port trait objects.

use std::path::PathBuf;

use crate::ports::alerts::AlertSink;
use crate::ports::clock::Clock;
use crate::ports::id_gen::IdGenerator;
use crate::ports::store::TaskStore;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire
/// up different adapter implementations; command handlers only ever see
/// the traits.
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// ID generator for new task identifiers.
    pub id_gen: Box<dyn IdGenerator>,
    /// Versioned task collection.
    pub store: Box<dyn TaskStore>,
    /// Notification channel for deadline alerts.
    pub alerts: Box<dyn AlertSink>,
}

impl ServiceContext {
    /// Creates a live context: system clock, random ids, a JSON file store
    /// at `store_path`, and console notifications.
    #[must_use]
    pub fn live(store_path: PathBuf) -> Self {
        use crate::adapters::live::{ConsoleAlertSink, JsonFileStore, LiveClock, LiveIdGenerator};

        Self {
            clock: Box::new(LiveClock),
            id_gen: Box::new(LiveIdGenerator::new()),
            store: Box::new(JsonFileStore::new(store_path)),
            alerts: Box::new(ConsoleAlertSink),
        }
    }
}
