//! Logging infrastructure for the cwdeploy library.
//!
//! Library code logs through the `log` facade. This module provides a
//! stderr backend with three verbosity levels; stdout is left to the
//! match and no-match reports.

use std::fmt;

use crate::context::{Environment, LOG_MODE_ENV_VAR};

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use cwdeploy::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all diagnostics.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info, and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use cwdeploy::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The most verbose `log` level shown at this setting.
    #[must_use]
    pub const fn filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

/// A stderr backend for the `log` facade.
///
/// # Examples
///
/// ```
/// use cwdeploy::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert_eq!(
///     logger.format(log::Level::Warn, format_args!("odd route")),
///     Some("WARN: odd route".to_string())
/// );
/// assert_eq!(logger.format(log::Level::Info, format_args!("hidden")), None);
/// ```
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Format a message, or `None` if it is filtered out at this level.
    #[must_use]
    pub fn format(&self, level: log::Level, args: fmt::Arguments<'_>) -> Option<String> {
        if level > self.level.filter() {
            return None;
        }

        let tag = match level {
            log::Level::Error => "ERROR",
            log::Level::Warn => "WARN",
            log::Level::Info => "INFO",
            log::Level::Debug | log::Level::Trace => "DEBUG",
        };
        Some(format!("{tag}: {args}"))
    }

    /// Install this logger as the global `log` backend.
    ///
    /// Installing twice is harmless; the first logger stays in place.
    pub fn install(self) {
        let filter = self.level.filter();
        if log::set_logger(Box::leak(Box::new(self))).is_ok() {
            log::set_max_level(filter);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if let Some(line) = self.format(record.level(), *record.args()) {
            eprintln!("{line}");
        }
    }

    fn flush(&self) {}
}

/// Builds a logger from CLI flags and the environment.
///
/// The priority order is:
/// 1. CLI flags (verbose, then quiet)
/// 2. `CWDEPLOY_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// An unrecognized `CWDEPLOY_LOG_MODE` falls back to Normal.
///
/// # Examples
///
/// ```
/// use cwdeploy::{init_logger, Environment, LogLevel};
///
/// let env = Environment::new("/").with_var("CWDEPLOY_LOG_MODE", "quiet");
/// assert_eq!(init_logger(false, false, &env).level(), LogLevel::Quiet);
/// assert_eq!(init_logger(true, false, &env).level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool, env: &Environment) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    if let Some(level) = env.var(LOG_MODE_ENV_VAR).and_then(|v| LogLevel::parse(v).ok()) {
        return Logger::new(level);
    }

    Logger::new(LogLevel::Normal)
}
