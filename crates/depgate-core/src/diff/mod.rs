//! Dependency diff engine.
//!
//! Compares a previously recorded dependency map with the current one.
//!
//! ## Entry points
//!
//! ```
//! use depgate_core::diff::{compute_diff, is_changed};
//! use depgate_core::model::DependencyMap;
//!
//! let before: DependencyMap = [("a", "1.0")].into_iter().collect();
//! let after: DependencyMap = [("a", "2.0")].into_iter().collect();
//!
//! assert!(is_changed(&before, &after));
//! let diff = compute_diff(&before, &after);
//! assert_eq!(diff.changed.len(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Exact comparison**: versions are opaque strings; `1.0` and `1.0.0`
//!   are different.
//! - **Order independence**: declaration order never affects the verdict.
//! - **Agreement**: `compute_diff(a, b).is_changed() == is_changed(a, b)`.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{compute_diff, is_changed};
pub use human_summary::render_human_summary;
pub use model::{DependencyDiff, DiffClassification, VersionChange};
