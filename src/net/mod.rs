//! TCP connection establishment.
//!
//! This module resolves a host/port pair to candidate socket addresses and
//! connects to the first one that accepts, in resolution order. Resolution
//! is delegated to the standard library's `ToSocketAddrs` call, which
//! returns IPv4 and IPv6 candidates alike.

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::debug;

use crate::error_handling::FetchError;

/// Resolves a host/port pair to an ordered list of candidate addresses.
///
/// # Errors
///
/// Returns `FetchError::Resolution` when the resolver fails, propagating its
/// diagnostic — this includes a port string the resolver cannot interpret.
pub fn resolve(host: &str, port: &str) -> Result<Vec<SocketAddr>, FetchError> {
    let candidates = format!("{host}:{port}")
        .to_socket_addrs()
        .map_err(|source| FetchError::Resolution {
            host: host.to_string(),
            port: port.to_string(),
            source,
        })?
        .collect::<Vec<_>>();
    debug!("resolved {host}:{port} to {} candidate(s)", candidates.len());
    Ok(candidates)
}

/// Establishes a TCP connection to `host:port` and applies the receive
/// timeout.
///
/// Candidates are tried in resolution order; the first successful connect
/// wins and the rest are discarded. A socket whose connect attempt fails is
/// closed before the next candidate is tried. On success the receive
/// timeout is applied before the stream is returned; if that fails, the
/// stream is closed and the whole connect fails.
///
/// # Errors
///
/// Returns `FetchError::Resolution` if resolution fails, and
/// `FetchError::Connection` if every candidate is exhausted without a
/// successful connect or the timeout cannot be applied.
pub fn connect(host: &str, port: &str, timeout: Duration) -> Result<TcpStream, FetchError> {
    let candidates = resolve(host, port)?;

    let mut stream = None;
    for addr in &candidates {
        match TcpStream::connect(addr) {
            Ok(connected) => {
                debug!("connected to {addr}");
                stream = Some(connected);
                break;
            }
            Err(e) => {
                debug!("connect attempt to {addr} failed: {e}");
            }
        }
    }

    let stream = stream.ok_or_else(|| FetchError::Connection {
        host: host.to_string(),
        port: port.to_string(),
        reason: format!(
            "no reachable address out of {} candidate(s)",
            candidates.len()
        ),
    })?;

    if let Err(e) = stream.set_read_timeout(Some(timeout)) {
        // The stream drops (and closes) on this return path
        return Err(FetchError::Connection {
            host: host.to_string(),
            port: port.to_string(),
            reason: format!("failed to set receive timeout: {e}"),
        });
    }

    Ok(stream)
}
