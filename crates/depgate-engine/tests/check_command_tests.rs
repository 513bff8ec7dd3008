// Integration tests for the gate check command
// Covers the changed/unchanged verdict, history isolation between manifests,
// store recovery, and failures that must not change the exit code

use depgate_core::errors::ExErrorKind;
use depgate_core::logging_facility::init_test_capture;
use depgate_core::model::Dialect;
use depgate_engine::{CheckOutcome, RunConfig, RunController, RunState};
use depgate_store::{HistoryStore, LoadStatus};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn store_path(&self) -> PathBuf {
        self.dir.path().join("state").join("depgate-history.json")
    }

    fn check(&self, dialect: Dialect, manifest: &Path) -> RunController {
        RunController::new(RunConfig {
            dialect,
            manifest_path: manifest.to_path_buf(),
            store_path: self.store_path(),
            report_path: None,
        })
    }
}

#[test]
fn test_same_manifest_changed_then_unchanged() {
    let ws = Workspace::new();
    let manifest = ws.write("api/requirements.txt", "flask==1.2\nrequests\n");

    let first = ws.check(Dialect::Requirements, &manifest).run().unwrap();
    let second = ws.check(Dialect::Requirements, &manifest).run().unwrap();
    let third = ws.check(Dialect::Requirements, &manifest).run().unwrap();

    assert_eq!(first.exit_code(), 10);
    assert_eq!(first.state, RunState::Persisted);
    assert!(first.persisted);
    assert_eq!(first.history, LoadStatus::Missing);

    assert_eq!(second.exit_code(), 11);
    assert_eq!(second.state, RunState::Skipped);
    assert!(!second.persisted);
    assert_eq!(third.exit_code(), 11);
}

#[test]
fn test_version_bump_is_changed_once() {
    let ws = Workspace::new();
    let manifest = ws.write("web/package.json", r#"{"dependencies": {"a": "1.0"}}"#);
    ws.check(Dialect::PackageJson, &manifest).run().unwrap();

    ws.write("web/package.json", r#"{"dependencies": {"a": "2.0"}}"#);
    let bumped = ws.check(Dialect::PackageJson, &manifest).run().unwrap();
    assert_eq!(bumped.outcome, CheckOutcome::Changed);
    assert_eq!(bumped.diff.changed["a"].old, "1.0");
    assert_eq!(bumped.diff.changed["a"].new, "2.0");

    let again = ws.check(Dialect::PackageJson, &manifest).run().unwrap();
    assert_eq!(again.outcome, CheckOutcome::Unchanged);
}

#[test]
fn test_reordered_entries_are_unchanged() {
    let ws = Workspace::new();
    let manifest = ws.write(
        "web/package.json",
        r#"{"dependencies": {"a": "1", "b": "2"}, "devDependencies": {"c": "3"}}"#,
    );
    ws.check(Dialect::PackageJson, &manifest).run().unwrap();

    ws.write(
        "web/package.json",
        r#"{"devDependencies": {"c": "3"}, "dependencies": {"b": "2", "a": "1"}}"#,
    );
    let result = ws.check(Dialect::PackageJson, &manifest).run().unwrap();
    assert_eq!(result.outcome, CheckOutcome::Unchanged);
}

#[test]
fn test_manifests_do_not_disturb_each_other() {
    // Given: two manifests sharing one store
    let ws = Workspace::new();
    let a = ws.write("a/requirements.txt", "flask==1.0\n");
    let b = ws.write("b/requirements.txt", "django==4.2\n");
    ws.check(Dialect::Requirements, &a).run().unwrap();
    ws.check(Dialect::Requirements, &b).run().unwrap();

    // When: only A changes
    ws.write("a/requirements.txt", "flask==2.0\n");
    let changed = ws.check(Dialect::Requirements, &a).run().unwrap();

    // Then: A is changed, B's record is untouched and still unchanged
    assert_eq!(changed.outcome, CheckOutcome::Changed);
    let record = HistoryStore::new(ws.store_path()).load();
    assert_eq!(record.len(), 2);
    assert_eq!(
        record.get(&b.display().to_string()).get("django"),
        Some("4.2")
    );
    let b_again = ws.check(Dialect::Requirements, &b).run().unwrap();
    assert_eq!(b_again.outcome, CheckOutcome::Unchanged);
}

#[test]
fn test_garbage_store_counts_as_first_run() {
    let ws = Workspace::new();
    let manifest = ws.write("requirements.txt", "flask\n");
    fs::create_dir_all(ws.store_path().parent().unwrap()).unwrap();
    fs::write(ws.store_path(), b"garbage\x00\x01").unwrap();

    let result = ws.check(Dialect::Requirements, &manifest).run().unwrap();

    assert_eq!(result.exit_code(), 10);
    assert!(matches!(result.history, LoadStatus::Recovered { .. }));
    assert!(result.persisted);
    assert!(HistoryStore::new(ws.store_path()).try_load().unwrap().is_some());
}

#[test]
fn test_persist_failure_keeps_changed_verdict() {
    // Given: a store path whose parent is a regular file
    let ws = Workspace::new();
    let manifest = ws.write("requirements.txt", "flask==1.2\n");
    let blocker = ws.write("blocker", "file, not a directory");
    let controller = RunController::new(RunConfig {
        dialect: Dialect::Requirements,
        manifest_path: manifest,
        store_path: blocker.join("depgate-history.json"),
        report_path: None,
    });

    // When
    let result = controller.run().unwrap();

    // Then: the verdict stands, only the persisted flag records the failure
    assert_eq!(result.outcome, CheckOutcome::Changed);
    assert_eq!(result.state, RunState::Persisted);
    assert!(!result.persisted);
}

#[test]
fn test_missing_manifest_is_io_error() {
    let ws = Workspace::new();
    let missing = ws.dir.path().join("nope").join("requirements.txt");

    let err = ws.check(Dialect::Requirements, &missing).run().unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Io);
    assert_eq!(err.manifest_path(), Some(missing.display().to_string().as_str()));
    assert!(!ws.store_path().exists());
}

#[test]
fn test_malformed_manifest_is_fatal_and_leaves_store_alone() {
    let ws = Workspace::new();
    let manifest = ws.write("package.json", "{ not json");

    let err = ws.check(Dialect::PackageJson, &manifest).run().unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::MalformedInput);
    assert_eq!(err.op(), Some("parse_manifest"));
    assert!(err.to_string().contains("package.json"));
    assert!(!ws.store_path().exists());
}

#[test]
fn test_empty_manifest_first_seen_is_changed() {
    // Given: a manifest that declares nothing and has never been checked
    let ws = Workspace::new();
    let manifest = ws.write("package.json", r#"{"name": "bare"}"#);

    // When: checked twice
    let first = ws.check(Dialect::PackageJson, &manifest).run().unwrap();
    let second = ws.check(Dialect::PackageJson, &manifest).run().unwrap();

    // Then: first sighting is recorded, the repeat is unchanged
    assert_eq!(first.exit_code(), 10);
    assert!(first.first_seen);
    assert!(first.persisted);
    assert!(!first.diff.is_changed());
    assert_eq!(second.exit_code(), 11);
    assert!(!second.first_seen);

    let record = HistoryStore::new(ws.store_path()).load();
    assert_eq!(record.lookup(&manifest.display().to_string()), Some(&Default::default()));
}

#[test]
fn test_empty_manifest_after_garbage_store_rewrites_store() {
    let ws = Workspace::new();
    let manifest = ws.write("requirements.txt", "# no deps yet\n");
    fs::create_dir_all(ws.store_path().parent().unwrap()).unwrap();
    fs::write(ws.store_path(), b"\x00garbage").unwrap();

    let first = ws.check(Dialect::Requirements, &manifest).run().unwrap();
    let second = ws.check(Dialect::Requirements, &manifest).run().unwrap();

    assert_eq!(first.exit_code(), 10);
    assert!(matches!(first.history, LoadStatus::Recovered { .. }));
    assert_eq!(second.exit_code(), 11);
    assert_eq!(second.history, LoadStatus::Loaded { entries: 1 });
}

#[cfg(unix)]
#[test]
fn test_non_utf8_manifest_path_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let ws = Workspace::new();
    let manifest = ws
        .dir
        .path()
        .join(OsStr::from_bytes(b"requirements-\xff.txt"));

    let err = ws.check(Dialect::Requirements, &manifest).run().unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Configuration);
    assert_eq!(err.op(), Some("resolve_identity"));
    assert!(!ws.store_path().exists());
}

#[test]
fn test_report_written_when_requested() {
    let ws = Workspace::new();
    let manifest = ws.write("requirements.txt", "flask==1.2\nrequests>=2.0\n");
    let report_path = ws.dir.path().join("out").join("report.json");

    let result = RunController::new(RunConfig {
        dialect: Dialect::Requirements,
        manifest_path: manifest.clone(),
        store_path: ws.store_path(),
        report_path: Some(report_path.clone()),
    })
    .run()
    .unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["outcome"], "changed");
    assert_eq!(report["exit_code"], 10);
    assert_eq!(report["dialect"], "pip");
    assert_eq!(report["manifest_path"], manifest.display().to_string());
    assert_eq!(report["run_id"], result.run_id.as_str());
    assert_eq!(report["diff"]["added"]["requests"], ">=2.0");
    assert_eq!(report["history"]["status"], "missing");
    assert_eq!(report["first_seen"], true);
    assert_eq!(report["persisted"], true);
}

#[test]
fn test_report_failure_does_not_change_outcome() {
    let ws = Workspace::new();
    let manifest = ws.write("requirements.txt", "flask\n");
    let blocker = ws.write("blocker", "x");

    let result = RunController::new(RunConfig {
        dialect: Dialect::Requirements,
        manifest_path: manifest,
        store_path: ws.store_path(),
        report_path: Some(blocker.join("report.json")),
    })
    .run()
    .unwrap();

    assert_eq!(result.exit_code(), 10);
    assert!(result.persisted);
}

#[test]
fn test_boundary_events_carry_run_id() {
    let capture = init_test_capture();
    let ws = Workspace::new();
    let manifest = ws.write("requirements.txt", "flask==1.2\n");

    let controller = ws.check(Dialect::Requirements, &manifest);
    controller.run().unwrap();
    let run_id = controller.run_id().as_str().to_string();

    let events: Vec<_> = capture
        .events_for_op("dependency_check")
        .into_iter()
        .filter(|e| e.field("run_id") == Some(run_id.as_str()))
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event.as_deref(), Some("start"));
    assert_eq!(events[1].event.as_deref(), Some("end"));
    assert_eq!(events[1].field("outcome"), Some("changed"));
    assert_eq!(events[1].field("exit_code"), Some("10"));
}
