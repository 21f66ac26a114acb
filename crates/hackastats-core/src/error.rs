//! Error types for hackastats
//!
//! This module defines the error types used throughout the hackastats crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use hackastats_core::error::{HackastatsError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to HackastatsError
//!     let _file = std::fs::read_to_string("nonexistent.json")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for hackastats operations
///
/// The aggregation entry points are lenient and never surface these; they
/// are returned by loading, configuration, and the strict variants.
#[derive(Error, Debug)]
pub enum HackastatsError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A daily total carried a date that is not `YYYY-MM-DD`
    #[error("Malformed date: {0}")]
    MalformedDate(String),

    /// Epoch seconds outside the representable calendar range
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in hackastats
///
/// # Example
///
/// ```
/// use hackastats_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, HackastatsError>;
