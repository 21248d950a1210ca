//! Error types
//!
//! Only configuration errors ever reach callers. Storage errors are produced
//! by `KeyValueStore` implementations and absorbed by the persistence bridge.

use thiserror::Error;

/// Rejected session configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Initial countdown must be at least one second
    #[error("initial time must be between 1 and {max} seconds, got {0}", max = u32::MAX)]
    InitialTimeOutOfRange(i64),

    /// Penalty must be at least one second
    #[error("penalty must be between 1 and {max} seconds, got {0}", max = u32::MAX)]
    PenaltyOutOfRange(i64),

    /// Settings document could not be parsed
    #[error("invalid settings: {0}")]
    Parse(String),
}

/// Failure talking to the key/value store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("failed to read '{key}': {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("failed to write '{key}': {reason}")]
    WriteFailed { key: String, reason: String },
}
