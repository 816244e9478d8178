//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::io;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors produced by the fetch pipeline.
///
/// Each variant identifies the stage that failed: URL decomposition,
/// resolution, connection, request serialization, send, or receive. The
/// underlying system diagnostic is carried where one exists so the caller
/// can report a human-readable message.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL does not start with `http://`.
    #[error("only http:// URLs are supported")]
    UnsupportedScheme,

    /// Host/port resolution failed.
    #[error("failed to resolve {host}:{port}: {source}")]
    Resolution {
        /// Host component of the URL
        host: String,
        /// Port component of the URL
        port: String,
        /// Resolver diagnostic
        source: io::Error,
    },

    /// Every candidate address was tried and none accepted a connection,
    /// or the receive timeout could not be applied to the socket.
    #[error("failed to connect to {host}:{port}: {reason}")]
    Connection {
        /// Host component of the URL
        host: String,
        /// Port component of the URL
        port: String,
        /// What went wrong across the candidate list
        reason: String,
    },

    /// The serialized request would exceed the fixed wire-format bound.
    #[error("serialized request exceeds the {limit} byte limit")]
    RequestTooLarge {
        /// The bound that would have been exceeded
        limit: usize,
    },

    /// Writing the request to the socket failed.
    #[error("failed to send request: {0}")]
    Send(#[source] io::Error),

    /// A hard read error, or a timeout before the header/body boundary
    /// was seen.
    #[error("failed to read response: {0}")]
    Receive(#[source] io::Error),

    /// Response header accumulation exceeded the configured cap.
    #[error("response headers exceed the {limit} byte limit")]
    HeaderOverflow {
        /// The accumulation cap that was exceeded
        limit: usize,
    },

    /// Writing received bytes to the output sink failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}
