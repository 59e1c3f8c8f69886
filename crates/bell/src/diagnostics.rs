//! Diagnostics logger that routes log records to a host callback
//!
//! Embedding hosts install this as the global `log` backend and point it at
//! their own console. Records are dropped while no callback is set.

use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use log::{Level, Log, Metadata, Record, SetLoggerError};

/// Receives every log record that passes the level filter
pub trait LogCallback: Send + Sync {
    fn on_log(&self, level: Level, target: &str, message: &str);
}

static DIAGNOSTICS: OnceLock<DiagnosticsLogger> = OnceLock::new();

struct DiagnosticsLogger {
    callback: RwLock<Option<Arc<dyn LogCallback>>>,
    max_level: RwLock<Level>,
}

impl DiagnosticsLogger {
    fn new(max_level: Level) -> Self {
        Self {
            callback: RwLock::new(None),
            max_level: RwLock::new(max_level),
        }
    }

    fn max_level(&self) -> Level {
        self.max_level.read().map(|l| *l).unwrap_or(Level::Info)
    }
}

impl Log for DiagnosticsLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level()
            && self.callback.read().ok().is_some_and(|cb| cb.is_some())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(guard) = self.callback.read()
            && let Some(callback) = guard.as_ref()
        {
            callback.on_log(record.level(), record.target(), &record.args().to_string());
        }
    }

    fn flush(&self) {}
}

/// Install the diagnostics logger as the global logger
///
/// Fails if another logger (e.g. env_logger) is already installed. The
/// callback can be set before or after installation.
pub fn init_diagnostics(max_level: Level) -> Result<(), SetLoggerError> {
    let logger = DIAGNOSTICS.get_or_init(|| DiagnosticsLogger::new(max_level));
    log::set_logger(logger)?;
    set_log_level(max_level);
    Ok(())
}

/// Set (or clear) the callback receiving log records
pub fn set_log_callback(callback: Option<Arc<dyn LogCallback>>) {
    let logger = DIAGNOSTICS.get_or_init(|| DiagnosticsLogger::new(Level::Info));
    if let Ok(mut guard) = logger.callback.write() {
        *guard = callback;
    }
}

/// Change the level filter at runtime
pub fn set_log_level(level: Level) {
    if let Some(logger) = DIAGNOSTICS.get() {
        if let Ok(mut guard) = logger.max_level.write() {
            *guard = level;
        }
        log::set_max_level(level.to_level_filter());
    }
}

/// One captured log record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Callback that keeps every record in memory
#[derive(Default)]
pub struct DiagnosticLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Entries at `level` whose target starts with `target`
    pub fn matching(&self, level: Level, target: &str) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level && e.target.starts_with(target))
            .collect()
    }
}

impl LogCallback for DiagnosticLog {
    fn on_log(&self, level: Level, target: &str, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                level,
                target: target.to_string(),
                message: message.to_string(),
            });
    }
}
