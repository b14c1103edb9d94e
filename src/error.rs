//! Error types for the tana-paste library.
//!
//! Conversion itself never fails: every pattern that does not match simply
//! leaves the text unchanged, so [`crate::convert::convert`] returns a plain
//! [`crate::output::ConversionOutput`]. Errors only exist at the boundary,
//! where a source document is read or chunk files are written, and when a
//! [`crate::config::ConversionConfig`] is built with impossible settings.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the tana-paste library.
#[derive(Debug, Error)]
pub enum TanaPasteError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file was read but is not valid UTF-8 text.
    #[error("Input '{path}' is not valid UTF-8 text\nRe-save the document as UTF-8 and try again.")]
    InvalidEncoding { path: PathBuf },

    /// Any other failure while reading the source document.
    #[error("Failed to read input '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write a chunk file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
