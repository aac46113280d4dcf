//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ExplorerError`] which covers every failure mode of the
//! catalog explorer. It uses `thiserror` for ergonomic error definitions and
//! includes constructors for the variants that carry context.
//!
//! # Public API
//! - [`ExplorerError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ExplorerError>`
//!
//! # Error Categories
//! - **Fetch**: network failures, non-success API answers, cancelled requests.
//!   These are retryable and never clear data already on screen.
//! - **Storage**: the durable key-value store could not be read or written
//! - **Notes**: note text failed validation
//! - **Selection**: invalid index input against the displayed list
//! - **Configuration**: unreadable or invalid settings

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for catalog-explorer
#[derive(Error, Debug)]
pub enum ExplorerError {
    // Fetch errors
    #[error("Request to the catalog failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Request was superseded before it completed")]
    Cancelled,

    #[error("Invalid catalog URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    // Storage errors
    #[error("Storage unavailable at '{path}': {source}")]
    StorageUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse stored data at '{path}': {source}")]
    StorageCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Note errors
    #[error("{reason}")]
    InvalidNote { reason: String },

    // Selection errors
    #[error("Invalid index format: {input}. Use format like: 1, 1-3, or 1,3,5")]
    InvalidIndexFormat { input: String },

    #[error("Invalid range format: '{range}'. Use format like '3-6'")]
    InvalidRangeFormat { range: String },

    #[error("Invalid range: start ({start}) must be <= end ({end})")]
    InvalidRangeOrder { start: usize, end: usize },

    #[error("Index must be positive (got 0)")]
    ZeroIndex,

    #[error("Index {index} is out of range (1-{max} available)")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("No indices provided. Usage: fav <indices>\nExample: fav 1 3-5,8")]
    NoIndicesProvided,

    #[error("Nothing is displayed yet. Run 'browse' first to list entities.")]
    NoDisplayedEntities,

    #[error("Invalid {name}: '{value}'. Expected one of: {expected}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Convenience type alias for Results using ExplorerError
pub type Result<T> = std::result::Result<T, ExplorerError>;

impl ExplorerError {
    /// Whether re-issuing the identical request may succeed.
    ///
    /// Only fetch failures are retryable; everything else is either a user
    /// input problem or a local environment problem.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Cancelled => true,
            Self::Api { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            _ => false,
        }
    }

    /// Create an API error from a status code and raw body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    /// Create an error for an unrecognized option value
    pub fn invalid_value(name: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidValue {
            name,
            value: value.into(),
            expected,
        }
    }

    /// Create a storage unavailable error
    pub fn storage_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a storage corrupt error
    pub fn storage_corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::StorageCorrupt {
            path: path.into(),
            source,
        }
    }

    /// Create a note validation error
    pub fn invalid_note(reason: impl Into<String>) -> Self {
        Self::InvalidNote {
            reason: reason.into(),
        }
    }

    /// Create an invalid index format error
    pub fn invalid_index_format(input: impl Into<String>) -> Self {
        Self::InvalidIndexFormat {
            input: input.into(),
        }
    }

    /// Create an invalid range format error
    pub fn invalid_range_format(range: impl Into<String>) -> Self {
        Self::InvalidRangeFormat {
            range: range.into(),
        }
    }

    /// Create an invalid range order error
    pub fn invalid_range_order(start: usize, end: usize) -> Self {
        Self::InvalidRangeOrder { start, end }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(index: usize, max: usize) -> Self {
        Self::IndexOutOfRange { index, max }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
