//! Logging for the Galaxy3D shader toolchain
//!
//! This module provides a flexible logging system with:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - File and line information for detailed ERROR logs
//!
//! There is no process-wide logger. Every compile and reflect call receives
//! the logger it should report to as an explicit `&dyn Logger` argument.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to route compiler and reflection diagnostics to your
/// own sink (file logging, editor console, test capture, etc.)
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_shader::galaxy3d::log::{Logger, LogEntry};
///
/// struct FileLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    ///
    /// # Arguments
    ///
    /// * `entry` - The log entry to process
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "galaxy3d::shader::spirv", "galaxy3d::shader::compiler")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose debug information (typically disabled in release)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (skipped attributes, unsupported resource kinds)
    Warn,

    /// Error messages (critical issues with file:line details)
    Error,
}

/// Default logger implementation using colored console output
///
/// Colors:
/// - Trace: bright_black
/// - Debug: cyan
/// - Info: green
/// - Warn: yellow
/// - Error: red + bold
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        // Format timestamp as YYYY-MM-DD HH:MM:SS.mmm
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                severity_str,
                source,
                entry.message,
                file,
                line
            );
        } else {
            println!(
                "[{}] [{}] [{}] {}",
                timestamp,
                severity_str,
                source,
                entry.message
            );
        }
    }
}

/// Logger that discards every entry
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _entry: &LogEntry) {}
}

/// Logger forwarding `(severity, message)` pairs to a closure
///
/// Whatever per-caller context the sink needs (a window handle, a channel,
/// a counter) is captured by the closure itself.
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_shader::galaxy3d::log::{CallbackLogger, LogSeverity};
///
/// let logger = CallbackLogger::new(|severity, message| {
///     if severity >= LogSeverity::Warn {
///         eprintln!("{}", message);
///     }
/// });
/// ```
pub struct CallbackLogger {
    callback: Box<dyn Fn(LogSeverity, &str) + Send + Sync>,
}

impl CallbackLogger {
    /// Wrap a closure as a logger
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(LogSeverity, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl Logger for CallbackLogger {
    fn log(&self, entry: &LogEntry) {
        (self.callback)(entry.severity, &entry.message);
    }
}

/// Send a message to `logger` (used by the `shader_*!` macros)
pub fn dispatch(logger: &dyn Logger, severity: LogSeverity, source: &str, message: String) {
    logger.log(&LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: source.to_string(),
        message,
        file: None,
        line: None,
    });
}

/// Send a message with file:line information (used by `shader_error!`)
pub fn dispatch_detailed(
    logger: &dyn Logger,
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    logger.log(&LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: source.to_string(),
        message,
        file: Some(file),
        line: Some(line),
    });
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, typically disabled)
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_shader::{shader_trace, galaxy3d::log::NullLogger};
/// # let logger = NullLogger;
/// shader_trace!(&logger, "galaxy3d::shader", "Visiting variable {}", 3);
/// ```
#[macro_export]
macro_rules! shader_trace {
    ($logger:expr, $source:expr, $($arg:tt)*) => {
        $crate::log::dispatch(
            $logger,
            $crate::galaxy3d::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message (development information)
#[macro_export]
macro_rules! shader_debug {
    ($logger:expr, $source:expr, $($arg:tt)*) => {
        $crate::log::dispatch(
            $logger,
            $crate::galaxy3d::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message (important events)
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_shader::{shader_info, galaxy3d::log::NullLogger};
/// # let logger = NullLogger;
/// shader_info!(&logger, "galaxy3d::shader::compiler", "Compiled shader: {}", "a.spirv");
/// ```
#[macro_export]
macro_rules! shader_info {
    ($logger:expr, $source:expr, $($arg:tt)*) => {
        $crate::log::dispatch(
            $logger,
            $crate::galaxy3d::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message (potential issues)
#[macro_export]
macro_rules! shader_warn {
    ($logger:expr, $source:expr, $($arg:tt)*) => {
        $crate::log::dispatch(
            $logger,
            $crate::galaxy3d::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! shader_error {
    ($logger:expr, $source:expr, $($arg:tt)*) => {
        $crate::log::dispatch_detailed(
            $logger,
            $crate::galaxy3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR message and evaluate to the matching `Error` variant
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_shader::{shader_err, galaxy3d::{Error, log::NullLogger}};
/// # let logger = NullLogger;
/// let err: Error = shader_err!(&logger, "galaxy3d::shader::spirv", InternalError,
///     "SPIR-V reflection failed: {}", "bad magic");
/// ```
#[macro_export]
macro_rules! shader_err {
    ($logger:expr, $source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::dispatch_detailed(
            $logger,
            $crate::galaxy3d::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::galaxy3d::Error::$variant(message)
    }};
}

/// Log an ERROR message and return the matching `Error` variant from the function
#[macro_export]
macro_rules! shader_bail {
    ($logger:expr, $source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::shader_err!($logger, $source, $variant, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
