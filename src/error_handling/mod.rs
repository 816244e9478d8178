//! Error handling.
//!
//! This module provides the error type definitions for the fetch pipeline.
//! Every error is terminal for the current invocation: there is no retry,
//! backoff, or partial-success path anywhere in the pipeline.

mod types;

// Re-export public API
pub use types::{FetchError, InitializationError};
