//! Severity levels for diagnostics.
//!
//! Nothing in this crate aborts decoding. The severity only separates input
//! that had to be substituted from input that was merely suspicious.

use std::fmt;

/// The severity level of a diagnostic.
///
/// - [`Severity::Error`] marks malformed input that was replaced by an empty value
/// - [`Severity::Warning`] marks input that was skipped or looks inconsistent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Malformed input that was recovered by substitution.
    Error,

    /// A skipped entry or a data-quality finding.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
