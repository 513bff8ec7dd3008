//! depgate Store - Persistence layer for the per-manifest history
//!
//! Provides:
//! - A self-describing JSON envelope for the history record
//! - Atomic temp→rename writes so interrupted runs never truncate the store
//! - Loading that treats a missing or unreadable store as "no history yet"

pub mod atomic;
pub mod codec;
pub mod errors;
pub mod history;

// Re-export key types
pub use errors::Result;
pub use history::{HistoryStore, LoadStatus, LoadedHistory, DEFAULT_STORE_FILE_NAME};
