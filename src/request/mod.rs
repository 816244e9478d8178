//! HTTP/1.1 request serialization.
//!
//! This module builds the single wire-format buffer sent to the server:
//! request line, defaulted `Host`/`Connection`/`Content-Length` headers,
//! caller headers verbatim, blank line, body. The buffer is bounded by
//! `MAX_REQUEST_SIZE`; overrunning the bound is an error, never a
//! truncation.

use crate::config::{DEFAULT_HTTP_PORT, MAX_REQUEST_SIZE};
use crate::error_handling::FetchError;
use crate::url::Target;

/// A request descriptor, ready for serialization.
///
/// Header lines are kept as raw `Name: Value` strings in insertion order,
/// duplicates allowed, and are emitted verbatim without validation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method
    pub method: String,
    /// Request path
    pub path: String,
    /// Host component of the URL
    pub host: String,
    /// Port component of the URL
    pub port: String,
    /// Caller-supplied raw header lines
    pub headers: Vec<String>,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Builds a descriptor from a decomposed target and the caller's
    /// options, applying the method default: `GET`, or `POST` when a body
    /// is present and no explicit method was given.
    pub fn new(
        target: &Target,
        method: Option<&str>,
        headers: Vec<String>,
        body: Option<Vec<u8>>,
    ) -> Self {
        let method = match method {
            Some(m) => m.to_string(),
            None if body.is_some() => "POST".to_string(),
            None => "GET".to_string(),
        };
        Self {
            method,
            path: target.path.clone(),
            host: target.host.clone(),
            port: target.port.clone(),
            headers,
            body,
        }
    }

    /// Serializes the request into a single contiguous wire-format buffer.
    ///
    /// Emission order is fixed: request line, `Host` (unless the caller
    /// supplied one), `Connection: close` (always, even when the caller
    /// supplied their own `Connection` header — a deliberate, if debatable,
    /// policy), `Content-Length` (when a body is present and the caller did
    /// not supply one), caller headers in original order, blank line, body.
    ///
    /// The `Host` and `Content-Length` presence checks are each a full scan
    /// of the header list. The list is small and bounded, so the repeated
    /// scan is an accepted cost.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::RequestTooLarge` if the serialized request
    /// would exceed `MAX_REQUEST_SIZE`.
    pub fn build(&self) -> Result<Vec<u8>, FetchError> {
        let mut wire = Vec::with_capacity(MAX_REQUEST_SIZE);

        append(
            &mut wire,
            format!("{} {} HTTP/1.1\r\n", self.method, self.path).as_bytes(),
        )?;

        if !has_header(&self.headers, "Host") {
            let host_line = if self.port == DEFAULT_HTTP_PORT {
                format!("Host: {}\r\n", self.host)
            } else {
                format!("Host: {}:{}\r\n", self.host, self.port)
            };
            append(&mut wire, host_line.as_bytes())?;
        }

        append(&mut wire, b"Connection: close\r\n")?;

        if let Some(body) = &self.body {
            if !has_header(&self.headers, "Content-Length") {
                append(
                    &mut wire,
                    format!("Content-Length: {}\r\n", body.len()).as_bytes(),
                )?;
            }
        }

        for header in &self.headers {
            append(&mut wire, header.as_bytes())?;
            append(&mut wire, b"\r\n")?;
        }

        append(&mut wire, b"\r\n")?;

        if let Some(body) = &self.body {
            append(&mut wire, body)?;
        }

        Ok(wire)
    }
}

/// Appends `bytes` to the wire buffer, enforcing the fixed size bound.
fn append(wire: &mut Vec<u8>, bytes: &[u8]) -> Result<(), FetchError> {
    if wire.len() + bytes.len() > MAX_REQUEST_SIZE {
        return Err(FetchError::RequestTooLarge {
            limit: MAX_REQUEST_SIZE,
        });
    }
    wire.extend_from_slice(bytes);
    Ok(())
}

/// Returns true when any header line starts with `name` followed by a
/// colon, compared case-insensitively.
fn has_header(headers: &[String], name: &str) -> bool {
    headers.iter().any(|line| {
        let line = line.as_bytes();
        line.len() > name.len()
            && line[name.len()] == b':'
            && line[..name.len()].eq_ignore_ascii_case(name.as_bytes())
    })
}
