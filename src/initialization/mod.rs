//! Application initialization.
//!
//! This module provides logger setup for the binary front end. All
//! initialization functions return proper error types for error handling.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
