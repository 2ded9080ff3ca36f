// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor error types.
//!
//! Only file and format work can fail. Pointer handling recovers locally.

use camrail_rail::RailError;
use thiserror::Error;

/// Editor errors
#[derive(Debug, Error)]
pub enum EditorError {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be parsed
    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] ron::error::SpannedError),

    /// Settings could not be written
    #[error("Settings format error: {0}")]
    SettingsFormat(#[from] ron::Error),

    /// Rail document error
    #[error("Rail document error: {0}")]
    Rail(#[from] RailError),

    /// Save requested with no document path
    #[error("No document path set")]
    NoDocumentPath,
}

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
