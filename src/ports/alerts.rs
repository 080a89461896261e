//! Alert sink port for user-facing notifications.

use crate::error::AlertError;

/// How prominently a notification should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Routine digest of upcoming work.
    Normal,
    /// Last call — the deadline is less than a day away.
    High,
}

/// Delivers notifications; fire-and-forget.
///
/// The core never blocks on acknowledgement. A delivery failure is logged
/// and reported as [`AlertError::Unavailable`]; it must not abort a sweep
/// or the detection pipeline.
pub trait AlertSink: Send + Sync {
    /// Sends one notification.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Unavailable`] when the channel is unreachable.
    fn notify(&self, title: &str, message: &str, urgency: Urgency) -> Result<(), AlertError>;
}
