//! ID generator port for producing unique task identifiers.

/// Generates unique identifiers.
///
/// The only hard requirement is uniqueness within one task store; the live
/// adapter uses a time-based prefix plus a random suffix. Abstracting the
/// generator lets tests substitute a predictable sequence.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
