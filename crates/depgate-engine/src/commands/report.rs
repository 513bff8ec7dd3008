//! Machine-readable check report.
//!
//! The exit code stays the only stable contract; the report is an optional
//! side channel for tooling that wants the diff itself.

use crate::commands::check::{CheckOutcome, CheckResult, RunState};
use chrono::{DateTime, Utc};
use depgate_core::diff::{render_human_summary, DependencyDiff};
use depgate_core::model::Dialect;
use depgate_store::atomic::atomic_write;
use depgate_store::errors::{serialization_error, Result};
use depgate_store::LoadStatus;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub manifest_path: String,
    pub dialect: Dialect,
    pub outcome: CheckOutcome,
    pub exit_code: i32,
    pub state: RunState,
    pub dependency_count: usize,
    pub summary: String,
    pub diff: DependencyDiff,
    pub first_seen: bool,
    pub persisted: bool,
    pub history: LoadStatus,
}

impl CheckReport {
    pub fn from_result(result: &CheckResult) -> Self {
        Self {
            run_id: result.run_id.as_str().to_string(),
            generated_at: Utc::now(),
            manifest_path: result.identity.clone(),
            dialect: result.dialect,
            outcome: result.outcome,
            exit_code: result.exit_code(),
            state: result.state,
            dependency_count: result.current.len(),
            summary: render_human_summary(&result.diff),
            diff: result.diff.clone(),
            first_seen: result.first_seen,
            persisted: result.persisted,
            history: result.history.clone(),
        }
    }

    /// Write the report as pretty JSON, replacing any previous file.
    ///
    /// # Errors
    ///
    /// `Serialization` or `Io` from encoding and the atomic write.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut bytes =
            serde_json::to_vec_pretty(self).map_err(|e| serialization_error("report_write", e))?;
        bytes.push(b'\n');
        atomic_write(path, &bytes)
    }
}
