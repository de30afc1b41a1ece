//! Error and diagnostic system for use case documents.
//!
//! Decoding never rejects a well-formed JSON document. Instead, every
//! substitution or skipped entry is recorded as a [`Diagnostic`] with a
//! [`Severity`] and an [`ErrorCode`], and logged as it is emitted. Only text
//! that is not JSON at all yields a [`DecodeError`].
//!
//! # Example
//!
//! ```
//! # use usegraph_dto::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::warning("data link 4 references unknown destination 99")
//!     .with_code(ErrorCode::W203)
//!     .with_path("/dataLinks/2")
//!     .with_help("the edge is kept and targets `module-99`");
//! assert_eq!(diag.to_string(), "warning[W203]: data link 4 references unknown destination 99");
//! ```

mod collector;
mod decode_error;
mod diagnostic;
mod error_code;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use decode_error::DecodeError;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use severity::Severity;
