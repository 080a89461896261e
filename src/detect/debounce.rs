//! Re-scan debouncing for high-churn pages.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Default quiet interval between mutation-triggered re-scans.
#[must_use]
pub fn default_quiet_interval() -> Duration {
    Duration::seconds(1)
}

/// Gates mutation-triggered re-scans to at most one per quiet interval.
///
/// The decision takes `now` explicitly, so the gate is deterministic under
/// test and shares the batch's clock.
pub struct Debouncer {
    quiet: Duration,
    last_allowed: Mutex<Option<DateTime<Utc>>>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet interval.
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, last_allowed: Mutex::new(None) }
    }

    /// Returns true when a re-scan may run now, and records the grant.
    ///
    /// The first call always passes; subsequent calls pass only once the
    /// quiet interval has elapsed since the last grant.
    pub fn should_scan(&self, now: DateTime<Utc>) -> bool {
        let mut last = self.last_allowed.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let allowed = match *last {
            None => true,
            Some(at) => now.signed_duration_since(at) >= self.quiet,
        };
        if allowed {
            *last = Some(now);
        }
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn first_request_always_passes() {
        let debouncer = Debouncer::new(Duration::seconds(1));
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert!(debouncer.should_scan(now));
    }

    #[test]
    fn requests_within_the_quiet_interval_are_suppressed() {
        let debouncer = Debouncer::new(Duration::seconds(1));
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert!(debouncer.should_scan(now));
        assert!(!debouncer.should_scan(now + Duration::milliseconds(300)));
        assert!(!debouncer.should_scan(now + Duration::milliseconds(900)));
        assert!(debouncer.should_scan(now + Duration::seconds(1)));
    }

    #[test]
    fn grant_resets_the_interval() {
        let debouncer = Debouncer::new(Duration::seconds(1));
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert!(debouncer.should_scan(now));
        assert!(debouncer.should_scan(now + Duration::seconds(2)));
        // The grant at +2s starts a fresh interval.
        assert!(!debouncer.should_scan(now + Duration::milliseconds(2500)));
    }
}
