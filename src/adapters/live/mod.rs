//! Live adapters backed by the real system.

pub mod alerts;
pub mod clock;
pub mod id_gen;
pub mod page;
pub mod store;

pub use alerts::ConsoleAlertSink;
pub use clock::LiveClock;
pub use id_gen::LiveIdGenerator;
pub use page::PlainTextPage;
pub use store::JsonFileStore;
