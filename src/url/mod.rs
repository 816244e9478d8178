//! URL decomposition.
//!
//! This module splits an absolute `http://` URL into the connection
//! parameters the rest of the pipeline needs: host, port, and path. It is
//! deliberately not a general URL parser — no percent-decoding, no IPv6
//! bracket handling, no query-string awareness beyond the path substring.

use crate::config::{DEFAULT_HTTP_PORT, HTTP_SCHEME};
use crate::error_handling::FetchError;

/// Connection parameters extracted from a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Host component (verbatim substring, no decoding)
    pub host: String,
    /// Port component, `"80"` when the URL carries none
    pub port: String,
    /// Path component, `"/"` when the URL carries none
    pub path: String,
}

/// Decomposes an absolute HTTP URL into host, port, and path.
///
/// The remainder after the scheme is scanned left to right for a fragment
/// marker (`#`), a path marker (`/`), and a port marker (`:`). The path is
/// everything from the first `/` occurring before any fragment, up to the
/// fragment; absent any `/`, the path is `/`. The port marker counts only
/// when it occurs before both the path and the fragment; otherwise the port
/// defaults to `"80"`. The host is everything between the scheme and the
/// first of {port marker, path marker, fragment marker, end of string}.
///
/// # Errors
///
/// Returns `FetchError::UnsupportedScheme` unless the URL starts with
/// `http://`.
pub fn decompose(url: &str) -> Result<Target, FetchError> {
    let rest = url
        .strip_prefix(HTTP_SCHEME)
        .ok_or(FetchError::UnsupportedScheme)?;

    let fragment = rest.find('#');

    // A slash after the fragment belongs to the fragment, not the path
    let path_start = rest
        .find('/')
        .filter(|&slash| fragment.map_or(true, |frag| slash < frag));

    let path = match path_start {
        None => "/".to_string(),
        Some(slash) => match fragment {
            Some(frag) => rest[slash..frag].to_string(),
            None => rest[slash..].to_string(),
        },
    };

    // The port marker counts only before both the path and the fragment
    let port_start = rest.find(':').filter(|&colon| {
        path_start.map_or(true, |slash| colon < slash)
            && fragment.map_or(true, |frag| colon < frag)
    });

    let host_end = path_start.or(fragment).unwrap_or(rest.len());
    let (host, port) = match port_start {
        Some(colon) => (
            rest[..colon].to_string(),
            rest[colon + 1..host_end].to_string(),
        ),
        None => (rest[..host_end].to_string(), DEFAULT_HTTP_PORT.to_string()),
    };

    Ok(Target { host, port, path })
}
