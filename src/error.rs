//! # Error Types
//!
//! Error type shared by the label composer, the transports and the CLI.
//!
//! Out-of-range printer settings are not errors: the encoder clamps them.

use thiserror::Error;

/// Main error type for osilabel operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// Identifier failed template validation. Nothing was emitted.
    #[error("Invalid identifier: expected {expected} characters, got {actual}")]
    InvalidIdentifier { expected: usize, actual: usize },

    /// Barcode data outside the CODE39 character set. Nothing was emitted.
    #[error("Invalid CODE39 data: {0:?}")]
    InvalidBarcode(String),

    /// Label content does not fit the label height
    #[error("Layout overflow: {content_mm}mm of content on a {height_mm}mm label")]
    LayoutOverflow { height_mm: f64, content_mm: f64 },

    /// Malformed job or batch input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level errors (device open, write)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Preview rendering or encoding error
    #[error("Preview error: {0}")]
    Preview(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
