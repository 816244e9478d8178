//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! pipeline: size limits, read granularity, and timeouts.

/// Literal scheme prefix accepted by the URL decomposer. Anything else is
/// rejected with `FetchError::UnsupportedScheme`.
pub const HTTP_SCHEME: &str = "http://";

/// Default HTTP port, used when the URL carries no explicit port.
///
/// Kept as a string because the port travels through the pipeline as the
/// raw substring extracted from the URL; the `Host` header suffix check
/// compares against this literal.
pub const DEFAULT_HTTP_PORT: &str = "80";

/// Receive timeout applied to the connected socket, in seconds.
///
/// This is the only cancellation mechanism in the pipeline: every socket
/// read blocks at most this long.
pub const SOCKET_TIMEOUT_SECS: u64 = 3;

/// Maximum size of the serialized request in bytes.
///
/// Serialization that would exceed this bound fails with
/// `FetchError::RequestTooLarge` rather than truncating.
pub const MAX_REQUEST_SIZE: usize = 4096;

/// Size of the buffer used for each socket read.
pub const READ_BUFFER_SIZE: usize = 4096;

/// Cap on accumulated response header bytes (64 KiB).
///
/// A peer that never terminates its header block cannot grow the header
/// buffer past this bound; the overrun fails with
/// `FetchError::HeaderOverflow`.
pub const MAX_HEADER_BYTES: usize = 64 * 1024;
