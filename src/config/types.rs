//! Configuration types.
//!
//! This module defines the library configuration struct and the enums used
//! for logging options.

use clap::ValueEnum;

use crate::config::constants::SOCKET_TIMEOUT_SECS;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use url_fetch::Config;
///
/// let config = Config {
///     url: "http://example.com/".to_string(),
///     show_headers: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute `http://` URL to fetch
    pub url: String,

    /// Request method override; when `None`, the method defaults to `GET`,
    /// or `POST` when a body is present
    pub method: Option<String>,

    /// Raw request header lines (`Name: Value`), sent in order
    pub headers: Vec<String>,

    /// Optional request body
    pub body: Option<String>,

    /// Include response headers in the output
    pub show_headers: bool,

    /// Receive timeout in seconds
    pub timeout_secs: u64,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: None,
            headers: Vec::new(),
            body: None,
            show_headers: false,
            timeout_secs: SOCKET_TIMEOUT_SECS,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}
