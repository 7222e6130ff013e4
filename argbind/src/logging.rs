//! Logging collaborator and `tracing` integration
//!
//! The parser reports a failed parse through exactly one call to
//! [`Logger::log_error`]. Which sink receives it is up to the caller:
//!
//! - [`TracingLogger`] (default) forwards to `tracing` events
//! - [`ConsoleLogger`] writes prefixed, coloured lines to stdout/stderr
//! - [`MemoryLogger`] records messages, for tests
//!
//! # Example
//!
//! ```no_run
//! use argbind::logging::init_logging;
//! use tracing::info;
//!
//! // Initialize logging (call once at startup)
//! init_logging("my_tool");
//!
//! info!("Tool started");
//! ```

use std::sync::OnceLock;

use colored::Colorize;
use parking_lot::Mutex;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Sink for user-facing messages
pub trait Logger {
    /// Verbose diagnostic
    fn log_info(&self, message: &str);

    /// Normal message
    fn log_message(&self, message: &str);

    /// Success message
    fn log_success(&self, message: &str);

    /// Warning message
    fn log_warning(&self, message: &str);

    /// Error message
    fn log_error(&self, message: &str);
}

/// Forwards messages to `tracing` events under the `argbind` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log_info(&self, message: &str) {
        tracing::debug!(target: "argbind", "{message}");
    }

    fn log_message(&self, message: &str) {
        tracing::info!(target: "argbind", "{message}");
    }

    fn log_success(&self, message: &str) {
        tracing::info!(target: "argbind", outcome = "success", "{message}");
    }

    fn log_warning(&self, message: &str) {
        tracing::warn!(target: "argbind", "{message}");
    }

    fn log_error(&self, message: &str) {
        tracing::error!(target: "argbind", "{message}");
    }
}

/// Writes messages to the console, prefixed with an optional app name
///
/// Errors go to stderr, everything else to stdout. Success lines are green,
/// warnings yellow and errors red; `colored` drops the styling when
/// `NO_COLOR` is set.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogger {
    prefix: String,
}

impl ConsoleLogger {
    /// Create a logger; a non-blank `app` prefixes every line with `"{app}: "`
    #[must_use]
    pub fn new(app: Option<&str>) -> Self {
        let prefix = app
            .filter(|a| !a.trim().is_empty())
            .map(|a| format!("{a}: "))
            .unwrap_or_default();
        Self { prefix }
    }

    fn format(&self, label: &str, message: &str) -> String {
        format!("{}{label}{message}", self.prefix)
    }

    fn paint(channel: LogChannel, line: String) -> String {
        match channel {
            LogChannel::Success => line.green().to_string(),
            LogChannel::Warning => line.yellow().to_string(),
            LogChannel::Error => line.red().to_string(),
            LogChannel::Info | LogChannel::Message => line,
        }
    }
}

impl Logger for ConsoleLogger {
    fn log_info(&self, message: &str) {
        println!("{}", self.format("Info: ", message));
    }

    fn log_message(&self, message: &str) {
        println!("{}", self.format("", message));
    }

    fn log_success(&self, message: &str) {
        println!("{}", Self::paint(LogChannel::Success, self.format("Success: ", message)));
    }

    fn log_warning(&self, message: &str) {
        println!("{}", Self::paint(LogChannel::Warning, self.format("Warning: ", message)));
    }

    fn log_error(&self, message: &str) {
        eprintln!("{}", Self::paint(LogChannel::Error, self.format("Error: ", message)));
    }
}

/// Channel a recorded message was sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogChannel {
    /// [`Logger::log_info`]
    Info,
    /// [`Logger::log_message`]
    Message,
    /// [`Logger::log_success`]
    Success,
    /// [`Logger::log_warning`]
    Warning,
    /// [`Logger::log_error`]
    Error,
}

impl LogChannel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Info => "Info: ",
            Self::Message => "Message: ",
            Self::Success => "",
            Self::Warning => "Warning: ",
            Self::Error => "Error: ",
        }
    }
}

/// Records every message in memory
///
/// Each entry is stored with its channel label, e.g. `"Error: ..."`; success
/// messages are stored without a label.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(LogChannel, String)>>,
}

impl MemoryLogger {
    /// Create an empty logger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent to `channel`, oldest first
    #[must_use]
    pub fn entries(&self, channel: LogChannel) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Messages sent to the error channel, oldest first
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.entries(LogChannel::Error)
    }

    /// Forget every recorded message
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn record(&self, channel: LogChannel, message: &str) {
        self.entries
            .lock()
            .push((channel, format!("{}{message}", channel.prefix())));
    }
}

impl Logger for MemoryLogger {
    fn log_info(&self, message: &str) {
        self.record(LogChannel::Info, message);
    }

    fn log_message(&self, message: &str) {
        self.record(LogChannel::Message, message);
    }

    fn log_success(&self, message: &str) {
        self.record(LogChannel::Success, message);
    }

    fn log_warning(&self, message: &str) {
        self.record(LogChannel::Warning, message);
    }

    fn log_error(&self, message: &str) {
        self.record(LogChannel::Error, message);
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log_info(&self, message: &str) {
        (**self).log_info(message);
    }

    fn log_message(&self, message: &str) {
        (**self).log_message(message);
    }

    fn log_success(&self, message: &str) {
        (**self).log_success(message);
    }

    fn log_warning(&self, message: &str) {
        (**self).log_warning(message);
    }

    fn log_error(&self, message: &str) {
        (**self).log_error(message);
    }
}

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize `tracing` output for a command-line tool.
///
/// This sets up:
/// 1. A subscriber writing to stderr, filtered by `RUST_LOG` (default `info`)
/// 2. A bridge that forwards `log` crate calls to tracing
///
/// The `app` name is attached to the start-up event. Subsequent calls are
/// ignored.
pub fn init_logging(app: &str) {
    LOGGER_INITIALIZED.get_or_init(|| {
        tracing_log::LogTracer::init().ok();

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .ok();
    });
    tracing::debug!(target: "argbind", app, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_prefixes() {
        let logger = MemoryLogger::new();
        logger.log_error("Argument [-s] is required.");
        logger.log_warning("careful");
        logger.log_success("done");
        logger.log_info("detail");
        logger.log_message("plain");

        assert_eq!(logger.errors(), vec!["Error: Argument [-s] is required."]);
        assert_eq!(logger.entries(LogChannel::Warning), vec!["Warning: careful"]);
        assert_eq!(logger.entries(LogChannel::Success), vec!["done"]);
        assert_eq!(logger.entries(LogChannel::Info), vec!["Info: detail"]);
        assert_eq!(logger.entries(LogChannel::Message), vec!["Message: plain"]);

        logger.clear();
        assert!(logger.errors().is_empty());
    }

    #[test]
    fn test_logger_by_reference() {
        fn fail<L: Logger>(logger: L) {
            logger.log_error("boom");
        }

        let logger = MemoryLogger::new();
        fail(&logger);
        assert_eq!(logger.errors(), vec!["Error: boom"]);
    }

    #[test]
    fn test_console_prefix() {
        assert_eq!(
            ConsoleLogger::new(Some("tool")).format("Error: ", "bad"),
            "tool: Error: bad"
        );
        assert_eq!(ConsoleLogger::new(Some("  ")).format("", "plain"), "plain");
        assert_eq!(ConsoleLogger::new(None).format("Info: ", "x"), "Info: x");
    }

    #[test]
    fn test_console_colours() {
        colored::control::set_override(true);
        let line = || "tool: done".to_string();
        assert_eq!(ConsoleLogger::paint(LogChannel::Success, line()), "\x1b[32mtool: done\x1b[0m");
        assert_eq!(ConsoleLogger::paint(LogChannel::Warning, line()), "\x1b[33mtool: done\x1b[0m");
        assert_eq!(ConsoleLogger::paint(LogChannel::Error, line()), "\x1b[31mtool: done\x1b[0m");
        assert_eq!(ConsoleLogger::paint(LogChannel::Info, line()), "tool: done");
        assert_eq!(ConsoleLogger::paint(LogChannel::Message, line()), "tool: done");
        colored::control::unset_override();
    }

    #[test]
    fn test_init_logging() {
        // Should not panic when called
        init_logging("test_tool");

        // Should be idempotent - calling again should not panic
        init_logging("test_tool_2");

        TracingLogger.log_error("traced error");
        TracingLogger.log_success("traced success");
    }

    #[test]
    fn test_log_crate_forwarding() {
        init_logging("test_log_forward");

        // log crate macros should be forwarded to tracing
        log::info!("log crate info");
        log::warn!("log crate warn");
    }
}
