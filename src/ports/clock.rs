//! Clock port for obtaining the current time.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Detection, priority classification, and year-rollover all take `now` as
/// an explicit input; abstracting the clock keeps those paths deterministic
/// under test by substituting a fixed instant.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
