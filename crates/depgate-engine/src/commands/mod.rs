//! Command orchestration layer.
//!
//! Coordinates manifest parsing in `depgate-core` with the history file in
//! `depgate-store`.

pub mod check;
pub mod report;
