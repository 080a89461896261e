//! Live adapter for the `IdGenerator` port.

use chrono::Utc;
use uuid::Uuid;

use crate::ports::IdGenerator;

/// Live ID generator: millisecond timestamp prefix plus a random suffix.
///
/// The prefix keeps ids roughly sortable by detection time; the UUID
/// suffix carries the uniqueness guarantee.
pub struct LiveIdGenerator;

impl LiveIdGenerator {
    /// Creates a new live ID generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LiveIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for LiveIdGenerator {
    fn generate_id(&self) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("task_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_unique_ids() {
        let gen = LiveIdGenerator::new();
        let id1 = gen.generate_id();
        let id2 = gen.generate_id();

        assert_ne!(id1, id2);
        assert!(id1.starts_with("task_"));
    }
}
