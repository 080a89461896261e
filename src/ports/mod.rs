//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the detection core and an
//! external system (time, page text, task storage, notifications, IDs).
//! Implementations live in `src/adapters/`.

pub mod alerts;
pub mod clock;
pub mod id_gen;
pub mod page;
pub mod store;

pub use alerts::{AlertSink, Urgency};
pub use clock::Clock;
pub use id_gen::IdGenerator;
pub use page::{PageSource, TextFragment};
pub use store::{TaskSnapshot, TaskStore};
