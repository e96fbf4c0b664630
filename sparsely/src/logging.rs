//! Terminal output for sparsely tools.
//!
//! Library code reports through the `log` facade and never prints. A front
//! end builds a [`Logger`] from its flags, uses it for its own messages, and
//! may [`install`](Logger::install) it so library records reach stderr under
//! the same level filter. Every line is prefixed with `sparsely:` and the
//! message severity.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_ENV: &str = "SPARSELY_LOG_MODE";

/// How much a tool prints, ordered from least to most.
///
/// # Examples
///
/// ```
/// use sparsely::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert_eq!("VERBOSE".parse::<LogLevel>(), Ok(LogLevel::Verbose));
/// assert!("loud".parse::<LogLevel>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Nothing but command output.
    Quiet,
    /// Warnings and errors.
    #[default]
    Normal,
    /// Everything, including progress and library diagnostics.
    Verbose,
}

impl LogLevel {
    /// The most detailed `log` records shown at this level.
    #[must_use]
    pub const fn record_filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        })
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Quiet, Self::Normal, Self::Verbose]
            .into_iter()
            .find(|level| s.eq_ignore_ascii_case(&level.to_string()))
            .ok_or_else(|| format!("invalid log mode '{s}', expected quiet, normal or verbose"))
    }
}

/// Level-filtered messages on stderr.
///
/// # Examples
///
/// ```
/// use sparsely::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert!(logger.enabled(log::Level::Warn));
/// assert!(!logger.enabled(log::Level::Info));
/// logger.warn("pattern file is missing, starting empty");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// A logger printing at `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether a message of `severity` would be printed.
    #[must_use]
    pub fn enabled(&self, severity: log::Level) -> bool {
        severity <= self.level.record_filter()
    }

    /// Route library `log` records through this logger.
    ///
    /// Only the first installation in a process takes effect; later calls
    /// return `false`.
    pub fn install(self) -> bool {
        let installed = log::set_logger(Box::leak(Box::new(self))).is_ok();
        if installed {
            log::set_max_level(self.level.record_filter());
        }
        installed
    }

    /// Print an error.
    pub fn error(&self, message: impl fmt::Display) {
        self.emit(log::Level::Error, message);
    }

    /// Print a warning.
    pub fn warn(&self, message: impl fmt::Display) {
        self.emit(log::Level::Warn, message);
    }

    /// Print progress, shown only when verbose.
    pub fn info(&self, message: impl fmt::Display) {
        self.emit(log::Level::Info, message);
    }

    /// Print a diagnostic, shown only when verbose.
    pub fn debug(&self, message: impl fmt::Display) {
        self.emit(log::Level::Debug, message);
    }

    fn emit(&self, severity: log::Level, message: impl fmt::Display) {
        if self.enabled(severity) {
            eprintln!("{}", format_line(severity, message));
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        Logger::enabled(self, metadata.level())
    }

    fn log(&self, record: &log::Record<'_>) {
        self.emit(record.level(), record.args());
    }

    fn flush(&self) {}
}

fn format_line(severity: log::Level, message: impl fmt::Display) -> String {
    format!(
        "sparsely: {}: {message}",
        severity.as_str().to_ascii_lowercase()
    )
}

/// Build a logger from command-line flags and the environment.
///
/// `verbose` wins over `quiet`. Without either flag, a valid
/// `SPARSELY_LOG_MODE` decides; anything else means [`LogLevel::Normal`].
///
/// # Examples
///
/// ```
/// use sparsely::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = match (verbose, quiet) {
        (true, _) => LogLevel::Verbose,
        (false, true) => LogLevel::Quiet,
        (false, false) => env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|mode| mode.parse().ok())
            .unwrap_or_default(),
    };
    Logger::new(level)
}
