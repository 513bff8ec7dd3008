//! Gate check command with boundary logging.
//!
//! One invocation walks a fixed sequence of states:
//!
//! ```text
//! START → PARSED → COMPARED → PERSISTED | SKIPPED → EXIT
//! ```
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for the check:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure, and for swallowed persist/report failures
//!
//! Lower layers (store, core) use only `tracing::debug!()` and `warn!()`.

#![allow(clippy::result_large_err)]

use crate::commands::report::CheckReport;
use depgate_core::diff::{compute_diff, render_human_summary, DependencyDiff};
use depgate_core::errors::{ExError, ExErrorKind};
use depgate_core::manifest::parse_manifest;
use depgate_core::model::{DependencyMap, Dialect};
use depgate_core::{log_op_end, log_op_error, log_op_start};
use depgate_core_types::RunId;
use depgate_store::errors::{io_error, Result};
use depgate_store::{HistoryStore, LoadStatus};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Exit code when the dependency set changed or the manifest is new
pub const EXIT_CHANGED: i32 = 10;

/// Exit code when the dependency set matches the recorded one
pub const EXIT_UNCHANGED: i32 = 11;

/// Exit code for fatal failures (unreadable or malformed manifest)
pub const EXIT_FAILURE: i32 = 1;

const OP_CHECK: &str = "dependency_check";

/// Explicit configuration for one gate check
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub dialect: Dialect,
    /// Absolute manifest path; doubles as the history identity
    pub manifest_path: PathBuf,
    pub store_path: PathBuf,
    /// Optional JSON report destination
    pub report_path: Option<PathBuf>,
}

/// Run lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Start,
    Parsed,
    Compared,
    Persisted,
    Skipped,
    Exit,
}

/// Verdict of a gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Changed,
    Unchanged,
}

impl CheckOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckOutcome::Changed => EXIT_CHANGED,
            CheckOutcome::Unchanged => EXIT_UNCHANGED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckOutcome::Changed => "changed",
            CheckOutcome::Unchanged => "unchanged",
        }
    }
}

/// Everything a caller may want to know about a finished check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub run_id: RunId,
    pub outcome: CheckOutcome,
    pub identity: String,
    pub dialect: Dialect,
    pub current: DependencyMap,
    pub diff: DependencyDiff,
    /// True when the identity had no recorded entry before this run
    pub first_seen: bool,
    /// False when the outcome was `Changed` but the write failed
    pub persisted: bool,
    pub history: LoadStatus,
    /// `Persisted` or `Skipped`
    pub state: RunState,
}

impl CheckResult {
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}

/// Runs a single gate check against one history file
pub struct RunController {
    config: RunConfig,
    store: HistoryStore,
    run_id: RunId,
}

impl RunController {
    pub fn new(config: RunConfig) -> Self {
        let store = HistoryStore::new(config.store_path.clone());
        Self {
            config,
            store,
            run_id: RunId::new(),
        }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// Execute the check.
    ///
    /// ## Errors
    ///
    /// - `Configuration`: manifest path is not valid UTF-8
    /// - `Io`: manifest could not be read
    /// - `MalformedInput`: manifest could not be parsed in its dialect
    ///
    /// History load, persist and report failures never surface here.
    pub fn run(&self) -> Result<CheckResult> {
        let manifest_path = self.config.manifest_path.display().to_string();
        log_op_start!(
            OP_CHECK,
            run_id = self.run_id.as_str(),
            manifest_path = %manifest_path,
            dialect = self.config.dialect.as_str()
        );
        let start = Instant::now();

        let result = self.run_impl().map_err(|e| {
            log_op_error!(
                OP_CHECK,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = self.run_id.as_str(),
                manifest_path = %manifest_path
            );
            e
        })?;

        log_op_end!(
            OP_CHECK,
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = self.run_id.as_str(),
            outcome = result.outcome.as_str(),
            exit_code = result.exit_code(),
            dep_count = result.current.len(),
            change_count = result.diff.change_count(),
            first_seen = result.first_seen
        );

        Ok(result)
    }

    fn run_impl(&self) -> Result<CheckResult> {
        let mut state = RunState::Start;
        let identity = self.identity()?;
        let identity = identity.as_str();

        // Manifest
        let bytes = std::fs::read(&self.config.manifest_path)
            .map_err(|e| io_error("read_manifest", e).with_manifest_path(identity))?;
        let current = parse_manifest(self.config.dialect, &bytes).map_err(|e| {
            ExError::from(e)
                .with_op("parse_manifest")
                .with_manifest_path(identity)
        })?;
        state = self.transition(state, RunState::Parsed);

        // History
        let loaded = self.store.load_detailed();
        let mut record = loaded.record;
        let first_seen = record.lookup(identity).is_none();
        let previous = record.get(identity);
        let diff = compute_diff(&previous, &current);
        state = self.transition(state, RunState::Compared);

        tracing::debug!(
            run_id = self.run_id.as_str(),
            record_count = record.len(),
            summary = %render_human_summary(&diff),
            "dependencies compared"
        );

        // An unrecorded identity is changed even when its map is empty
        let (outcome, persisted) = if first_seen || diff.is_changed() {
            record.put(identity, current.clone());
            let persisted = self.persist(&record);
            state = self.transition(state, RunState::Persisted);
            (CheckOutcome::Changed, persisted)
        } else {
            state = self.transition(state, RunState::Skipped);
            (CheckOutcome::Unchanged, false)
        };

        let result = CheckResult {
            run_id: self.run_id.clone(),
            outcome,
            identity: identity.to_string(),
            dialect: self.config.dialect,
            current,
            diff,
            first_seen,
            persisted,
            history: loaded.status,
            state,
        };

        if let Some(report_path) = &self.config.report_path {
            self.write_report(&result, report_path);
        }

        self.transition(state, RunState::Exit);
        Ok(result)
    }

    /// Write the updated record; failures are logged and reported as `false`.
    fn persist(&self, record: &depgate_core::model::HistoryRecord) -> bool {
        let start = Instant::now();
        match self.store.persist(record) {
            Ok(()) => true,
            Err(e) => {
                log_op_error!(
                    "history_persist",
                    e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = self.run_id.as_str(),
                    store_path = %self.store.path().display()
                );
                false
            }
        }
    }

    fn write_report(&self, result: &CheckResult, report_path: &std::path::Path) {
        let start = Instant::now();
        if let Err(e) = CheckReport::from_result(result).write(report_path) {
            log_op_error!(
                "report_write",
                e,
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = self.run_id.as_str(),
                report_path = %report_path.display()
            );
        }
    }

    fn transition(&self, from: RunState, to: RunState) -> RunState {
        tracing::debug!(
            run_id = self.run_id.as_str(),
            from = ?from,
            to = ?to,
            "state transition"
        );
        to
    }

    /// History key for the manifest; must be exact, so lossy paths are refused.
    fn identity(&self) -> Result<String> {
        self.config
            .manifest_path
            .to_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ExError::new(ExErrorKind::Configuration)
                    .with_op("resolve_identity")
                    .with_message("manifest path is not valid UTF-8")
                    .with_manifest_path(self.config.manifest_path.display().to_string())
            })
    }
}
