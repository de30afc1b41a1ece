//! Error types for usegraph operations.
//!
//! This module provides the main error type [`UsegraphError`]. Data problems
//! in the input never surface here: they degrade the layout and are reported
//! through diagnostics and degradations instead.

use std::io;

use thiserror::Error;

use usegraph_dto::DecodeError;

/// The main error type for usegraph operations.
///
/// # Diagnostic Variants
///
/// The `Decode` variant keeps the source text so that callers can point at
/// the offending line and column.
#[derive(Debug, Error)]
pub enum UsegraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Decode { err: DecodeError, src: String },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<serde_json::Error> for UsegraphError {
    fn from(error: serde_json::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl UsegraphError {
    /// Create a new `Decode` error with the associated source text.
    pub fn new_decode_error(err: DecodeError, src: impl Into<String>) -> Self {
        Self::Decode {
            err,
            src: src.into(),
        }
    }
}
