// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for rail documents.

use thiserror::Error;

/// Errors raised while reading or writing rail documents.
///
/// Rail editing itself never fails; absent ids are no-ops.
#[derive(Debug, Error)]
pub enum RailError {
    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document written by an unknown format version
    #[error("Unsupported rail document version: {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the document
        found: String,
        /// Version this build reads
        expected: &'static str,
    },
}

/// Result type for rail document operations
pub type Result<T> = std::result::Result<T, RailError>;
