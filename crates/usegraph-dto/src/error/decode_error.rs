//! The error returned when a document is not JSON at all.

use thiserror::Error;

/// Syntax error in the document text.
///
/// Structural problems inside well-formed JSON never produce this error;
/// they are reported as [`Diagnostic`](crate::error::Diagnostic)s instead.
#[derive(Debug, Error)]
#[error("invalid JSON: {message}")]
pub struct DecodeError {
    line: usize,
    column: usize,
    message: String,
}

impl DecodeError {
    /// One-based line of the syntax error.
    pub fn line(&self) -> usize {
        self.line
    }

    /// One-based column of the syntax error.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Converts the line and column into a byte offset into `source`.
    ///
    /// The offset is clamped to the end of `source`.
    pub fn offset_in(&self, source: &str) -> usize {
        let line_start: usize = source
            .split_inclusive('\n')
            .take(self.line.saturating_sub(1))
            .map(str::len)
            .sum();
        (line_start + self.column.saturating_sub(1)).min(source.len())
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
