//! Urgency band classification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Urgency band of a task, a pure function of time-to-deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Seven days out or more.
    Low,
    /// Due within seven days.
    Medium,
    /// Due within three days.
    High,
    /// Due within a day.
    Urgent,
    /// Deadline already passed.
    Overdue,
}

impl Priority {
    /// Classifies a deadline relative to `now`.
    ///
    /// Bands: strictly past is `Overdue`; under one day `Urgent`; under three
    /// days `High`; under seven days `Medium`; otherwise `Low`. The boundary
    /// is inclusive — `deadline == now` is not yet past, so it classifies
    /// `Urgent`. Callers must use one consistent `now` across a batch so
    /// tasks near a band edge do not flap within a single pass.
    #[must_use]
    pub fn classify(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = deadline.signed_duration_since(now);
        if remaining < Duration::zero() {
            Self::Overdue
        } else if remaining < Duration::days(1) {
            Self::Urgent
        } else if remaining < Duration::days(3) {
            Self::High
        } else if remaining < Duration::days(7) {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Uppercase label for display (badge text).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
            Self::Overdue => "OVERDUE",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
            Self::Overdue => "overdue",
        };
        f.write_str(name)
    }
}
