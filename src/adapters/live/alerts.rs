//! Console adapter for the `AlertSink` port.

use crate::error::AlertError;
use crate::ports::alerts::{AlertSink, Urgency};

/// Alert sink that prints notifications to standard output.
pub struct ConsoleAlertSink;

impl AlertSink for ConsoleAlertSink {
    fn notify(&self, title: &str, message: &str, urgency: Urgency) -> Result<(), AlertError> {
        let marker = match urgency {
            Urgency::Normal => "[alert]",
            Urgency::High => "[ALERT]",
        };
        println!("{marker} {title}");
        for line in message.lines() {
            println!("  {line}");
        }
        Ok(())
    }
}
