//! Streaming response reader.
//!
//! This module reads the socket until the peer closes, splitting header
//! bytes from body bytes across arbitrary read boundaries. Header bytes are
//! accumulated (bounded) until the `\r\n\r\n` terminator is seen; every
//! byte after the terminator passes straight through to the output sink.
//! Chunked transfer-encoding is detected from the accumulated header text
//! but not decoded — chunk framing passes through verbatim.

use std::io::{ErrorKind, Read, Write};

use log::debug;

use crate::config::{MAX_HEADER_BYTES, READ_BUFFER_SIZE};
use crate::error_handling::FetchError;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Reader state. `ReadingBody` is terminal: once the header terminator has
/// been seen there is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    ReadingHeaders,
    ReadingBody,
}

/// Summary of a streamed response.
#[derive(Debug, Clone)]
pub struct ResponseSummary {
    /// Bytes of header text accumulated (terminating blank line excluded)
    pub header_bytes: usize,
    /// Body bytes forwarded to the output sink
    pub body_bytes: usize,
    /// Whether the headers declared `Transfer-Encoding: chunked`
    pub chunked: bool,
}

/// Streams a response from `source` to `out` until the peer closes.
///
/// While headers are being read, incoming bytes are appended to a bounded
/// buffer and the whole accumulation is searched for `\r\n\r\n`, so a
/// terminator straddling a read boundary is still found. Once the
/// terminator is seen, the header text (without the trailing blank line) is
/// emitted to `out` when `show_headers` is set, any bytes after the
/// terminator in the same read are written as body, and every subsequent
/// read passes through unbuffered.
///
/// A would-block/timeout read is benign completion only once the
/// header/body boundary has been seen; before that it is a
/// `FetchError::Receive`.
///
/// # Errors
///
/// Returns `FetchError::Receive` for hard read errors and for timeouts
/// before the boundary, `FetchError::HeaderOverflow` when header
/// accumulation exceeds `MAX_HEADER_BYTES`, and `FetchError::Output` when
/// writing to `out` fails.
pub fn stream_response<R: Read, W: Write>(
    source: &mut R,
    out: &mut W,
    show_headers: bool,
) -> Result<ResponseSummary, FetchError> {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    let mut headers: Vec<u8> = Vec::new();
    let mut state = ReadState::ReadingHeaders;
    let mut chunked = false;
    let mut body_bytes = 0usize;

    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if is_would_block(&e) => match state {
                // A trailing timeout after the boundary is treated as the
                // peer being done; before the boundary it is a hard error
                ReadState::ReadingBody => {
                    debug!("read timed out after {body_bytes} body bytes; treating as end of response");
                    break;
                }
                ReadState::ReadingHeaders => return Err(FetchError::Receive(e)),
            },
            Err(e) => return Err(FetchError::Receive(e)),
        };

        match state {
            ReadState::ReadingHeaders => {
                headers.extend_from_slice(&buf[..n]);
                match find_terminator(&headers) {
                    Some(pos) => {
                        // Everything past the terminator is body from the
                        // same read
                        let body = headers.split_off(pos + HEADER_TERMINATOR.len());
                        // Drop the blank line, keep the final header CRLF
                        headers.truncate(pos + 2);

                        chunked = is_chunked(&headers);
                        debug!(
                            "header block complete: {} bytes, chunked={chunked}",
                            headers.len()
                        );

                        if show_headers {
                            out.write_all(&headers).map_err(FetchError::Output)?;
                            out.write_all(b"\n").map_err(FetchError::Output)?;
                        }
                        if !body.is_empty() {
                            out.write_all(&body).map_err(FetchError::Output)?;
                            body_bytes += body.len();
                        }
                        state = ReadState::ReadingBody;
                    }
                    None => {
                        if headers.len() > MAX_HEADER_BYTES {
                            return Err(FetchError::HeaderOverflow {
                                limit: MAX_HEADER_BYTES,
                            });
                        }
                    }
                }
            }
            ReadState::ReadingBody => {
                out.write_all(&buf[..n]).map_err(FetchError::Output)?;
                body_bytes += n;
            }
        }
    }

    out.flush().map_err(FetchError::Output)?;

    Ok(ResponseSummary {
        header_bytes: headers.len(),
        body_bytes,
        chunked,
    })
}

fn is_would_block(e: &std::io::Error) -> bool {
    // Read timeouts surface as WouldBlock on Unix and TimedOut on Windows
    matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
}

/// Case-insensitive detection of `Transfer-Encoding:` followed by
/// `chunked` anywhere in the header text.
fn is_chunked(headers: &[u8]) -> bool {
    let text = String::from_utf8_lossy(headers).to_ascii_lowercase();
    match text.find("transfer-encoding:") {
        Some(pos) => text[pos..].contains("chunked"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Test reader that serves a script of read results, so tests control
    /// exactly where the read boundaries fall.
    struct ScriptedReader {
        script: Vec<io::Result<Vec<u8>>>,
    }

    impl ScriptedReader {
        fn new(script: Vec<io::Result<Vec<u8>>>) -> Self {
            Self { script }
        }

        fn from_chunks(chunks: &[&[u8]]) -> Self {
            Self::new(chunks.iter().map(|c| Ok(c.to_vec())).collect())
        }
    }

    impl Read for ScriptedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.script.is_empty() {
                return Ok(0);
            }
            match self.script.remove(0) {
                Ok(bytes) => {
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                Err(e) => Err(e),
            }
        }
    }

    fn would_block() -> io::Error {
        io::Error::new(ErrorKind::WouldBlock, "Resource temporarily unavailable")
    }

    const RESPONSE: &[u8] =
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello";

    #[test]
    fn test_single_read_splits_header_and_body() {
        let mut reader = ScriptedReader::from_chunks(&[RESPONSE]);
        let mut out = Vec::new();

        let summary = stream_response(&mut reader, &mut out, false).unwrap();
        assert_eq!(out, b"hello");
        assert_eq!(summary.body_bytes, 5);
        assert!(!summary.chunked);
    }

    #[test]
    fn test_show_headers_emits_header_text_then_body() {
        let mut reader = ScriptedReader::from_chunks(&[RESPONSE]);
        let mut out = Vec::new();

        stream_response(&mut reader, &mut out, true).unwrap();
        assert_eq!(
            out,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\nhello"
                .to_vec()
        );
    }

    #[test]
    fn test_terminator_straddles_read_boundary() {
        // Split inside the \r\n\r\n terminator itself
        for split in 1..RESPONSE.len() {
            let mut reader = ScriptedReader::from_chunks(&[&RESPONSE[..split], &RESPONSE[split..]]);
            let mut out = Vec::new();

            let summary = stream_response(&mut reader, &mut out, false).unwrap();
            assert_eq!(out, b"hello", "split at byte {split} broke the boundary");
            assert_eq!(summary.body_bytes, 5);
        }
    }

    #[test]
    fn test_split_response_matches_single_read_with_headers_shown() {
        let mut single = Vec::new();
        stream_response(
            &mut ScriptedReader::from_chunks(&[RESPONSE]),
            &mut single,
            true,
        )
        .unwrap();

        for split in 1..RESPONSE.len() {
            let mut out = Vec::new();
            stream_response(
                &mut ScriptedReader::from_chunks(&[&RESPONSE[..split], &RESPONSE[split..]]),
                &mut out,
                true,
            )
            .unwrap();
            assert_eq!(out, single, "split at byte {split} changed the output");
        }
    }

    #[test]
    fn test_body_after_boundary_passes_through_per_read() {
        let mut reader = ScriptedReader::from_chunks(&[
            b"HTTP/1.1 200 OK\r\n\r\npart one, ",
            b"part two",
        ]);
        let mut out = Vec::new();

        let summary = stream_response(&mut reader, &mut out, false).unwrap();
        assert_eq!(out, b"part one, part two");
        assert_eq!(summary.body_bytes, 18);
    }

    #[test]
    fn test_chunked_detection_is_case_insensitive() {
        for header in [
            "Transfer-Encoding: chunked",
            "transfer-encoding: chunked",
            "TRANSFER-ENCODING: CHUNKED",
            "Transfer-Encoding:chunked",
        ] {
            let response = format!("HTTP/1.1 200 OK\r\n{header}\r\n\r\n");
            let mut reader = ScriptedReader::from_chunks(&[response.as_bytes()]);
            let mut out = Vec::new();

            let summary = stream_response(&mut reader, &mut out, false).unwrap();
            assert!(summary.chunked, "{header:?} not detected");
        }
    }

    #[test]
    fn test_non_chunked_encoding_not_flagged() {
        let response = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: gzip\r\n\r\n";
        let mut reader = ScriptedReader::from_chunks(&[response]);
        let mut out = Vec::new();

        let summary = stream_response(&mut reader, &mut out, false).unwrap();
        assert!(!summary.chunked);
    }

    #[test]
    fn test_chunked_body_passes_through_verbatim() {
        // Chunk framing is not stripped
        let mut reader = ScriptedReader::from_chunks(&[
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n",
            b"5\r\nhello\r\n0\r\n\r\n",
        ]);
        let mut out = Vec::new();

        let summary = stream_response(&mut reader, &mut out, false).unwrap();
        assert!(summary.chunked);
        assert_eq!(out, b"5\r\nhello\r\n0\r\n\r\n");
    }

    #[test]
    fn test_timeout_before_boundary_is_receive_error() {
        let mut reader = ScriptedReader::new(vec![
            Ok(b"HTTP/1.1 200 OK\r\nContent-Le".to_vec()),
            Err(would_block()),
        ]);
        let mut out = Vec::new();

        let err = stream_response(&mut reader, &mut out, false).unwrap_err();
        assert!(matches!(err, FetchError::Receive(_)));
    }

    #[test]
    fn test_timeout_on_first_read_is_receive_error() {
        let mut reader = ScriptedReader::new(vec![Err(would_block())]);
        let mut out = Vec::new();

        let err = stream_response(&mut reader, &mut out, false).unwrap_err();
        assert!(matches!(err, FetchError::Receive(_)));
    }

    #[test]
    fn test_timeout_after_boundary_is_benign() {
        let mut reader = ScriptedReader::new(vec![
            Ok(b"HTTP/1.1 200 OK\r\n\r\npartial body".to_vec()),
            Err(would_block()),
        ]);
        let mut out = Vec::new();

        let summary = stream_response(&mut reader, &mut out, false).unwrap();
        assert_eq!(out, b"partial body");
        assert_eq!(summary.body_bytes, 12);
    }

    #[test]
    fn test_hard_error_is_receive_error_in_body_too() {
        let mut reader = ScriptedReader::new(vec![
            Ok(b"HTTP/1.1 200 OK\r\n\r\nbody".to_vec()),
            Err(io::Error::new(ErrorKind::ConnectionReset, "reset by peer")),
        ]);
        let mut out = Vec::new();

        let err = stream_response(&mut reader, &mut out, false).unwrap_err();
        assert!(matches!(err, FetchError::Receive(_)));
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        let mut reader = ScriptedReader::new(vec![
            Err(io::Error::new(ErrorKind::Interrupted, "interrupted")),
            Ok(RESPONSE.to_vec()),
        ]);
        let mut out = Vec::new();

        let summary = stream_response(&mut reader, &mut out, false).unwrap();
        assert_eq!(summary.body_bytes, 5);
    }

    #[test]
    fn test_header_accumulation_is_bounded() {
        // A peer that streams header lines forever must hit the cap
        let line = vec![b'h'; 1024];
        let reads = (MAX_HEADER_BYTES / line.len()) + 2;
        let mut reader =
            ScriptedReader::new((0..reads).map(|_| Ok(line.clone())).collect());
        let mut out = Vec::new();

        let err = stream_response(&mut reader, &mut out, false).unwrap_err();
        assert!(matches!(
            err,
            FetchError::HeaderOverflow { limit } if limit == MAX_HEADER_BYTES
        ));
    }

    #[test]
    fn test_eof_before_boundary_is_success_with_no_output() {
        // Orderly close before the terminator: header bytes stay buffered,
        // nothing reaches the output
        let mut reader = ScriptedReader::from_chunks(&[b"HTTP/1.1 200 OK\r\nTrunc"]);
        let mut out = Vec::new();

        let summary = stream_response(&mut reader, &mut out, false).unwrap();
        assert!(out.is_empty());
        assert_eq!(summary.body_bytes, 0);
        assert_eq!(summary.header_bytes, 22);
    }

    #[test]
    fn test_header_bytes_excludes_blank_line() {
        let mut reader = ScriptedReader::from_chunks(&[RESPONSE]);
        let mut out = Vec::new();

        let summary = stream_response(&mut reader, &mut out, false).unwrap();
        // Everything before the terminator plus the final CRLF
        assert_eq!(summary.header_bytes, RESPONSE.len() - 5 - 2);
    }
}
