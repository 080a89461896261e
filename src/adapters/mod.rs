//! Adapter implementations of the port traits.
//!
//! `live` talks to the real world (system clock, JSON file store, console
//! notifications, plain-text page captures); `memory` provides the
//! deterministic in-process substitutes used by tests.

pub mod live;
pub mod memory;
