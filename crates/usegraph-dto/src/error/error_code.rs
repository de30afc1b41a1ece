//! Diagnostic codes for use case documents.
//!
//! Codes are organized by phase:
//! - `E0xx` - Malformed document structure
//! - `W1xx` - Entries skipped while coercing collections
//! - `W2xx` - Data-quality findings

use std::fmt;

/// Codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Structure Errors (E0xx)
    // =========================================================================
    /// Document is not an object.
    ///
    /// The root value (or an element of a root array) is not a JSON object.
    /// It contributes nothing to the graph.
    E001,

    /// Collection is not a list.
    ///
    /// One of `moduleInstances`, `subsystems`, `dataLinks` or `controlLinks`
    /// is present but not an array. It is treated as empty.
    E002,

    // =========================================================================
    // Coercion Warnings (W1xx)
    // =========================================================================
    /// Collection entry skipped.
    ///
    /// An entry is not an object, or a required field is missing or has the
    /// wrong type.
    W100,

    /// Port list is not a list.
    ///
    /// A module or subsystem has `dataPorts` or `controlPorts` that is not an
    /// array. The ports are treated as empty.
    W101,

    /// Port entry skipped.
    W102,

    // =========================================================================
    // Data-Quality Warnings (W2xx)
    // =========================================================================
    /// Modules of one subgraph disagree on their subsystem.
    ///
    /// The first module naming a known subsystem decides the subgraph's parent.
    W200,

    /// Duplicate module id.
    W201,

    /// Module `parentId` names no known subsystem.
    W202,

    /// Link endpoint matches no module or subsystem.
    W203,

    /// Link port matches no known port.
    W204,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Structure errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            // Coercion warnings
            ErrorCode::W100 => "W100",
            ErrorCode::W101 => "W101",
            ErrorCode::W102 => "W102",
            // Data-quality warnings
            ErrorCode::W200 => "W200",
            ErrorCode::W201 => "W201",
            ErrorCode::W202 => "W202",
            ErrorCode::W203 => "W203",
            ErrorCode::W204 => "W204",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Structure errors
            ErrorCode::E001 => "document is not an object",
            ErrorCode::E002 => "collection is not a list",
            // Coercion warnings
            ErrorCode::W100 => "collection entry skipped",
            ErrorCode::W101 => "port list is not a list",
            ErrorCode::W102 => "port entry skipped",
            // Data-quality warnings
            ErrorCode::W200 => "subgraph subsystem disagreement",
            ErrorCode::W201 => "duplicate module id",
            ErrorCode::W202 => "unknown parent subsystem",
            ErrorCode::W203 => "unresolved link endpoint",
            ErrorCode::W204 => "unresolved link port",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::W100.to_string(), "W100");
        assert_eq!(ErrorCode::W203.to_string(), "W203");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E002.description(), "collection is not a list");
        assert_eq!(ErrorCode::W200.description(), "subgraph subsystem disagreement");
    }
}
