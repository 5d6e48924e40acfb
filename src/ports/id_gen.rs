//! ID generator port for producing run identifiers.

/// Generates unique identifiers.
///
/// Every repair run is tagged with one so log lines from the same run can
/// be grouped.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
