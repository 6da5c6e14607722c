//! HeartCare Engine - process-wide logger registry
//!
//! Scenes never share geometry, materials, or frame handles. The logger is
//! the only state held globally, stored behind a RwLock so custom loggers
//! can be swapped at runtime (tests capture entries this way).

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Minimum severity forwarded to the logger
static MIN_SEVERITY: OnceLock<RwLock<LogSeverity>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn min_severity_lock() -> &'static RwLock<LogSeverity> {
    MIN_SEVERITY.get_or_init(|| RwLock::new(Engine::default_min_severity()))
}

// ===== PUBLIC API =====

/// Global logging entry point used by the `scene_*!` macros
///
/// # Example
///
/// ```no_run
/// use heartcare_scene::heartcare::{Engine, log::{Logger, LogEntry, LogSeverity}};
///
/// struct Quiet;
/// impl Logger for Quiet {
///     fn log(&self, _entry: &LogEntry) {}
/// }
///
/// Engine::set_logger(Quiet);
/// Engine::set_min_severity(LogSeverity::Warn);
/// Engine::reset_logger();
/// ```
pub struct Engine;

impl Engine {
    /// Severity threshold applied when none was configured
    pub fn default_min_severity() -> LogSeverity {
        if cfg!(debug_assertions) {
            LogSeverity::Trace
        } else {
            LogSeverity::Info
        }
    }

    /// Replace the current logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger) and the severity threshold to its default
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
        Self::set_min_severity(Self::default_min_severity());
    }

    /// Drop every entry below `severity`
    pub fn set_min_severity(severity: LogSeverity) {
        if let Ok(mut lock) = min_severity_lock().write() {
            *lock = severity;
        }
    }

    /// Current severity threshold
    pub fn min_severity() -> LogSeverity {
        min_severity_lock()
            .read()
            .map(|lock| *lock)
            .unwrap_or_else(|_| Self::default_min_severity())
    }

    /// Log without source location (used by trace/debug/info/warn macros)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }

    /// Log with file:line information (used by `scene_error!`)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }

    fn dispatch(entry: LogEntry) {
        if entry.severity < Self::min_severity() {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&entry);
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
