//! Tracing subscriber setup.
//!
//! Libraries embedding this crate usually install their own subscriber; in
//! that case [`init_logging`] leaves it in place.

use std::path::PathBuf;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

static LOGGING_INIT: Once = Once::new();

/// Default log file name inside [`LoggingConfig::log_dir`].
pub const DEFAULT_LOG_FILE: &str = "posterpacks.log";

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log at debug level instead of info.
    pub verbose: bool,

    /// Write to a file in this directory instead of stderr.
    pub log_dir: Option<PathBuf>,

    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_dir: None,
            file_name: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> &'static str {
        if self.verbose {
            "posterpacks=debug"
        } else {
            "posterpacks=info"
        }
    }
}

/// Install the global subscriber. Only the first call has any effect.
///
/// When logging to a file, the returned guard flushes buffered lines on drop
/// and must be kept alive for as long as logging is wanted.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let mut guard = None;
    LOGGING_INIT.call_once(|| {
        guard = install(config);
    });
    guard
}

fn install(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

    if let Some(dir) = &config.log_dir {
        match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::never(dir, &config.file_name);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true)
                    .try_init();
                return Some(guard);
            }
            Err(e) => eprintln!(
                "posterpacks: cannot create log directory {}: {}; logging to stderr",
                dir.display(),
                e
            ),
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
    None
}
