//! depgate Core - Canonical in-memory change-detection kernel
//!
//! This crate provides the pure, I/O-free pieces of the dependency gate:
//! - Manifest parsing for `requirements.txt` and `package.json` into a
//!   canonical dependency map
//! - The per-manifest history record
//! - Structural diffing and the changed/unchanged verdict
//! - The error and logging facilities shared by the other crates

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod manifest;
pub mod model;

// Re-export commonly used types
pub use diff::{compute_diff, is_changed, DependencyDiff};
pub use errors::{DepGateError, ExError, ExErrorKind, Result};
pub use manifest::parse_manifest;
pub use model::{DependencyMap, Dialect, HistoryRecord, UNPINNED_VERSION};
