//! # Outbound Ports

use crate::domain::ContinuityError;

/// Flat string key-value storage - outbound port.
///
/// Implementations use interior mutability so one store can be shared
/// behind an `Arc`.
pub trait ContinuityStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &str) -> Result<Option<String>, ContinuityError>;

    /// Set a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), ContinuityError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), ContinuityError>;
}
