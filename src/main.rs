//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `url_fetch` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Error reporting and the process exit code
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use url_fetch::initialization::init_logger_with;
use url_fetch::{run_fetch, Config, LogFormat, LogLevel};

/// A minimal HTTP/1.1 client that streams a response over plain TCP.
#[derive(Parser, Debug)]
#[command(name = "url_fetch", version, about)]
struct Opt {
    /// Absolute http:// URL to fetch
    url: String,

    /// Add a custom request header (can be used multiple times)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    headers: Vec<String>,

    /// Request method (GET/POST/PUT/DELETE); defaults to GET, or POST when
    /// --data is given
    #[arg(short = 'X', long = "method", value_name = "METHOD")]
    method: Option<String>,

    /// Request body
    #[arg(short = 'd', long = "data", value_name = "DATA")]
    data: Option<String>,

    /// Show response headers in the output
    #[arg(short = 'i', long = "include-headers")]
    include_headers: bool,

    /// Receive timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = url_fetch::config::SOCKET_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Config {
            url: opt.url,
            method: opt.method,
            headers: opt.headers,
            body: opt.data,
            show_headers: opt.include_headers,
            timeout_secs: opt.timeout_secs,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}

fn main() -> Result<()> {
    let config: Config = Opt::parse().into();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_fetch(config) {
        Ok(report) => {
            log::debug!(
                "done: {} body bytes in {:.3}s",
                report.body_bytes,
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("url_fetch error: {e}");
            process::exit(1);
        }
    }
}
