//! url_fetch library: a minimal HTTP/1.1 client pipeline
//!
//! This library decomposes an absolute `http://` URL into connection
//! parameters, connects over TCP (trying every resolved candidate address),
//! serializes an HTTP/1.1 request, and streams the response to an output
//! sink, splitting header bytes from body bytes across arbitrary read
//! boundaries.
//!
//! # Example
//!
//! ```no_run
//! use url_fetch::{run_fetch, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     url: "http://example.com/".to_string(),
//!     show_headers: true,
//!     ..Default::default()
//! };
//!
//! let report = run_fetch(config)?;
//! eprintln!("{} header bytes, {} body bytes", report.header_bytes, report.body_bytes);
//! # Ok(())
//! # }
//! ```
//!
//! The client assumes `Connection: close` semantics: one connection, one
//! request, one response, with the server closing the socket at response
//! end. There is no TLS, no redirect following, no chunked-body decoding,
//! and no connection reuse.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod initialization;
mod net;
mod request;
mod response;
mod url;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{FetchError, InitializationError};
pub use run::{run_fetch, run_fetch_to, FetchReport};

// Internal run module (contains the pipeline orchestration)
mod run {
    use std::io::{self, Write};
    use std::time::{Duration, Instant};

    use log::debug;

    use crate::config::Config;
    use crate::error_handling::FetchError;
    use crate::net;
    use crate::request::HttpRequest;
    use crate::response::{self, ResponseSummary};
    use crate::url;

    /// Results of a completed fetch.
    ///
    /// The raw response bytes go to the output sink; this report carries
    /// the bookkeeping around them.
    #[derive(Debug, Clone)]
    pub struct FetchReport {
        /// Bytes of response header text received
        pub header_bytes: usize,
        /// Body bytes forwarded to the output sink
        pub body_bytes: usize,
        /// Whether the response declared `Transfer-Encoding: chunked`
        pub chunked: bool,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Fetches the configured URL and streams the response to standard
    /// output.
    ///
    /// This is the main entry point for the library. It runs the full
    /// pipeline: URL decomposition, connection (with multi-address
    /// fallback and receive timeout), request serialization, send, and
    /// streaming receive.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's `FetchError`, identifying the failing stage:
    /// unsupported scheme, resolution, connection, request serialization,
    /// send, or receive. Any open socket is closed on every failure path.
    pub fn run_fetch(config: Config) -> Result<FetchReport, FetchError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        run_fetch_to(config, &mut out)
    }

    /// Fetches the configured URL and streams the response to `out`.
    ///
    /// Identical to [`run_fetch`] with the output sink made explicit,
    /// which is what tests use.
    pub fn run_fetch_to<W: Write>(config: Config, out: &mut W) -> Result<FetchReport, FetchError> {
        let started = Instant::now();

        let target = url::decompose(&config.url)?;
        debug!(
            "decomposed {} into host={} port={} path={}",
            config.url, target.host, target.port, target.path
        );

        let mut stream = net::connect(
            &target.host,
            &target.port,
            Duration::from_secs(config.timeout_secs),
        )?;

        let request = HttpRequest::new(
            &target,
            config.method.as_deref(),
            config.headers,
            config.body.map(String::into_bytes),
        );
        let wire = request.build()?;
        debug!("sending {} request of {} bytes", request.method, wire.len());

        stream.write_all(&wire).map_err(FetchError::Send)?;

        let ResponseSummary {
            header_bytes,
            body_bytes,
            chunked,
        } = response::stream_response(&mut stream, out, config.show_headers)?;

        let report = FetchReport {
            header_bytes,
            body_bytes,
            chunked,
            elapsed_seconds: started.elapsed().as_secs_f64(),
        };
        debug!(
            "received {} header bytes and {} body bytes in {:.3}s (chunked={})",
            report.header_bytes, report.body_bytes, report.elapsed_seconds, report.chunked
        );
        Ok(report)
    }
}
