//! Process-wide log sink for the server and the terminal client.
//!
//! # Responsibility
//! - Turn a `(level, log_dir)` pair from configuration into a [`LogSpec`].
//! - Start the `flexi_logger` backend for that spec once per process.
//! - Route panics through the log sink as one sanitized line.
//!
//! # Invariants
//! - Starting twice with an equal spec is a no-op; a different spec is an error.
//! - Nothing here panics; every failure comes back as [`LoggingError`].
//! - Panic payloads may contain task titles, so they are flattened and capped.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecBuilder, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Once;
use thiserror::Error;

const FILE_BASENAME: &str = "taskinbox";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_LINE_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

/// Destination for log records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Size-rotated files under an absolute directory.
    Directory(PathBuf),
}

impl Display for LogTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Directory(dir) => write!(f, "dir:{}", dir.display()),
        }
    }
}

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSpec {
    pub level: LevelFilter,
    pub target: LogTarget,
}

impl LogSpec {
    /// Parses raw configuration values.
    ///
    /// `level` is case-insensitive and also accepts `warning`. `log_dir` must be
    /// absolute; `None` selects stderr.
    pub fn parse(level: &str, log_dir: Option<&str>) -> Result<Self, LoggingError> {
        let level = parse_level(level)?;
        let target = match log_dir.map(str::trim) {
            None => LogTarget::Stderr,
            Some("") => return Err(LoggingError::EmptyLogDir),
            Some(dir) => {
                let path = PathBuf::from(dir);
                if !path.is_absolute() {
                    return Err(LoggingError::RelativeLogDir(dir.to_string()));
                }
                LogTarget::Directory(path)
            }
        };
        Ok(Self { level, target })
    }
}

impl Display for LogSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "level={} target={}", self.level.as_str().to_ascii_lowercase(), self.target)
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error|off")]
    UnsupportedLevel(String),
    #[error("log_dir cannot be empty")]
    EmptyLogDir,
    #[error("log_dir must be an absolute path, got `{0}`")]
    RelativeLogDir(String),
    #[error("failed to create log directory `{path}`: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to start logger: {0}")]
    Backend(#[from] flexi_logger::FlexiLoggerError),
    #[error("logging already running with {active}; cannot switch to {requested}")]
    Conflict { active: LogSpec, requested: LogSpec },
}

struct ActiveLogger {
    spec: LogSpec,
    _handle: LoggerHandle,
}

/// Parses `level`/`log_dir` and starts logging. See [`start_logging`].
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), LoggingError> {
    start_logging(LogSpec::parse(level, log_dir)?)
}

/// Starts the backend for `spec`, or confirms it is already running with it.
///
/// # Errors
/// - The log directory cannot be created or the backend fails to start.
/// - Logging already runs with a different spec.
pub fn start_logging(spec: LogSpec) -> Result<(), LoggingError> {
    let active = ACTIVE.get_or_try_init(|| {
        let handle = open_backend(&spec)?;
        PANIC_HOOK.call_once(install_panic_hook);
        info!(
            "event=logging_init module=core status=ok {spec} os={} version={}",
            std::env::consts::OS,
            env!("CARGO_PKG_VERSION")
        );
        Ok::<_, LoggingError>(ActiveLogger {
            spec: spec.clone(),
            _handle: handle,
        })
    })?;

    if active.spec == spec {
        Ok(())
    } else {
        Err(LoggingError::Conflict {
            active: active.spec.clone(),
            requested: spec,
        })
    }
}

/// The spec logging runs with, if started.
pub fn active_log_spec() -> Option<LogSpec> {
    ACTIVE.get().map(|active| active.spec.clone())
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Flattens `value` to a single line of at most `limit` characters.
///
/// A `...` marker is appended when characters were cut.
pub fn sanitize_message(value: &str, limit: usize) -> String {
    let mut chars = value.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c });
    let mut line: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        line.push_str("...");
    }
    line
}

fn parse_level(raw: &str) -> Result<LevelFilter, LoggingError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("warning") {
        return Ok(LevelFilter::Warn);
    }
    LevelFilter::from_str(trimmed).map_err(|_| LoggingError::UnsupportedLevel(trimmed.to_string()))
}

fn open_backend(spec: &LogSpec) -> Result<LoggerHandle, LoggingError> {
    let logger = Logger::with(LogSpecBuilder::new().default(spec.level).build());
    let logger = match &spec.target {
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format),
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(FILE_BASENAME))
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
                )
                .append()
                .write_mode(WriteMode::BufferAndFlush)
                .format_for_files(flexi_logger::detailed_format)
        }
    };
    Ok(logger.start()?)
}

fn install_panic_hook() {
    let chained = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<non-string payload>");
        let at = panic_info
            .location()
            .map_or_else(|| "unknown".to_string(), |l| format!("{}:{}", l.file(), l.line()));
        error!(
            "event=panic module=core status=error at={at} message={}",
            sanitize_message(message, PANIC_LINE_LIMIT)
        );
        chained(panic_info);
    }));
}
