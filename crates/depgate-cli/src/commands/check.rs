//! Gate check command
//!
//! Usage: depgate (--pip <PATH> | --npm <PATH>) [--base-dir <DIR>]
//!        [--store-dir <DIR> | --store-file <FILE>] [--report <PATH>]

use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::{ArgGroup, Args, ValueEnum};
use depgate_core::errors::{ExError, ExErrorKind};
use depgate_core::logging_facility::{init, Profile};
use depgate_core::model::Dialect;
use depgate_engine::{RunConfig, RunController};
use depgate_store::HistoryStore;
use std::path::{Path, PathBuf};

/// Printed after the configuration error when no dialect flag is given
const USAGE_HINT: &str = "\
usage: depgate --pip <requirements.txt>
       depgate --npm <package.json>

exit codes: 10 = dependencies changed, 11 = unchanged";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("dialect").args(["pip", "npm"]).multiple(false)))]
pub struct CheckArgs {
    /// Check a pip requirements.txt
    #[arg(long, value_name = "PATH", value_parser = manifest_path_parser())]
    pub pip: Option<PathBuf>,

    /// Check an npm package.json
    #[arg(long, value_name = "PATH", value_parser = manifest_path_parser())]
    pub npm: Option<PathBuf>,

    /// Directory relative manifest paths are resolved against
    #[arg(long, env = "DEPGATE_BASE_DIR", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Directory holding the history file (default: next to the executable)
    #[arg(long, env = "DEPGATE_STORE_DIR", value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Explicit history file; takes precedence over --store-dir
    #[arg(long, env = "DEPGATE_STORE_FILE", value_name = "FILE")]
    pub store_file: Option<PathBuf>,

    /// Write a JSON report of the check here
    #[arg(long, env = "DEPGATE_REPORT", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Log output format (logs always go to stderr)
    #[arg(long, env = "DEPGATE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Accepts empty values so `--pip ""` falls through to the usage hint.
fn manifest_path_parser() -> impl TypedValueParser<Value = PathBuf> {
    OsStringValueParser::new().map(PathBuf::from)
}

impl CheckArgs {
    /// Selected dialect and manifest path; an empty path counts as absent.
    fn dialect_and_path(&self) -> Option<(Dialect, &Path)> {
        match (non_empty(&self.pip), non_empty(&self.npm)) {
            (Some(path), _) => Some((Dialect::Requirements, path)),
            (None, Some(path)) => Some((Dialect::PackageJson, path)),
            (None, None) => None,
        }
    }
}

/// Execute the check and return the process exit code
pub fn execute(args: CheckArgs) -> Result<i32, Box<dyn std::error::Error>> {
    init(match args.log_format {
        LogFormat::Text => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let Some((dialect, manifest)) = args.dialect_and_path() else {
        let err = missing_dialect();
        tracing::debug!(err_code = err.code(), "no manifest given");
        eprintln!("depgate: {}\n\n{}", err, USAGE_HINT);
        return Ok(0);
    };

    let manifest_path = resolve_manifest(manifest, args.base_dir.as_deref())?;
    let store_path = resolve_store(args.store_file.as_deref(), args.store_dir.as_deref())?;

    let controller = RunController::new(RunConfig {
        dialect,
        manifest_path,
        store_path,
        report_path: args.report.clone(),
    });
    let result = controller.run()?;

    Ok(result.exit_code())
}

fn non_empty(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}

fn missing_dialect() -> ExError {
    ExError::new(ExErrorKind::Configuration)
        .with_op("select_dialect")
        .with_message("no manifest given, pass --pip or --npm")
}

/// Absolute, canonical manifest path; this is the history identity.
fn resolve_manifest(
    manifest: &Path,
    base_dir: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base = match base_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let joined = base.join(manifest);
    joined
        .canonicalize()
        .map_err(|e| format!("cannot resolve manifest {}: {}", joined.display(), e).into())
}

fn resolve_store(
    store_file: Option<&Path>,
    store_dir: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(file) = store_file {
        return Ok(file.to_path_buf());
    }
    let dir = match store_dir {
        Some(dir) => dir.to_path_buf(),
        None => executable_dir()?,
    };
    Ok(HistoryStore::in_dir(dir).path().to_path_buf())
}

fn executable_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| format!("executable {} has no parent directory", exe.display()).into())
}
