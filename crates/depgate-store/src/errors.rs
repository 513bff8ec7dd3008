//! Error handling for depgate-store
//!
//! Wraps depgate-core ExError with store-specific helpers

use depgate_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error from serde_json::Error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a corrupt history error
pub fn corrupt_history(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::CorruptHistory)
        .with_op("history_decode")
        .with_message(reason)
}

/// Create an unsupported schema error
pub fn unsupported_schema(found: u64, supported: u32) -> ExError {
    ExError::new(ExErrorKind::UnsupportedSchema)
        .with_op("history_decode")
        .with_message(format!(
            "history schema_version {} is not supported (expected {})",
            found, supported
        ))
}

/// Create a persistence error wrapping a lower-level cause
pub fn persist_failed(store_path: &str, cause: ExError) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("history_persist")
        .with_message(format!("could not write history to {}", store_path))
        .with_source(cause)
}
