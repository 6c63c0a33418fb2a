//! Error types for u-airlift.

use thiserror::Error;

/// Result type alias for u-airlift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures from invalid call patterns.
///
/// Expected cargo edge cases never surface here; they are reported as
/// warnings or unloaded items on the result.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested aircraft type is not in the catalog.
    #[error("Unknown aircraft type: {0}")]
    UnknownAircraftType(String),

    /// Planner configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An aircraft profile in the catalog is unusable.
    #[error("Invalid aircraft catalog: {0}")]
    InvalidCatalog(String),

    /// JSON decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
