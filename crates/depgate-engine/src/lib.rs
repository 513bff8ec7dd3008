//! depgate Engine - Orchestration layer
//!
//! Drives one gate check: read and parse the manifest, compare it with the
//! recorded history, persist on change, and decide the exit code.

pub mod commands;

pub use commands::check::{
    CheckOutcome, CheckResult, RunConfig, RunController, RunState, EXIT_CHANGED, EXIT_FAILURE,
    EXIT_UNCHANGED,
};
pub use commands::report::CheckReport;
