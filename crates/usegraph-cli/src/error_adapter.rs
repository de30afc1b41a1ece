//! Error adapter for converting UsegraphError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Decode errors
//! point at the offending position in the input document.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use usegraph::UsegraphError;
use usegraph_dto::DecodeError;

/// Adapter for a JSON syntax error with its source text.
pub struct DecodeAdapter<'a> {
    err: &'a DecodeError,
    src: &'a str,
}

impl<'a> DecodeAdapter<'a> {
    pub fn new(err: &'a DecodeError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for DecodeAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DecodeAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for DecodeAdapter<'_> {}

impl MietteDiagnostic for DecodeAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("usegraph::decode"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let offset = self.err.offset_in(self.src);
        let len = usize::from(offset < self.src.len());
        let span = SourceSpan::new(offset.into(), len);
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span),
        )))
    }
}

/// Adapter for non-decode [`UsegraphError`] variants.
///
/// This adapter handles errors that don't have rich diagnostic information,
/// such as I/O errors, layout errors, and export errors.
pub struct ErrorAdapter<'a>(pub &'a UsegraphError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            UsegraphError::Io(_) => "usegraph::io",
            UsegraphError::Decode { .. } => "usegraph::decode",
            UsegraphError::Layout(_) => "usegraph::layout",
            UsegraphError::Export(_) => "usegraph::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A JSON syntax error with its location in the input.
    Decode(DecodeAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Decode(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Decode(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Decode(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Decode(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Decode(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`UsegraphError`] into a reportable error.
pub fn to_reportable(err: &UsegraphError) -> Reportable<'_> {
    match err {
        UsegraphError::Decode { err, src } => Reportable::Decode(DecodeAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use usegraph::ViewBuilder;

    use super::*;

    #[test]
    fn test_decode_error_has_label() {
        let source = "{\n  \"moduleInstances\": [,]\n}";
        let err = ViewBuilder::default()
            .decode(source)
            .expect_err("Invalid JSON should fail");

        let reportable = to_reportable(&err);
        assert!(matches!(reportable, Reportable::Decode(_)));
        assert!(reportable.to_string().starts_with("invalid JSON"));

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].offset() < source.len());
        assert!(labels[0].offset() >= source.find('[').unwrap_or_default());
    }

    #[test]
    fn test_layout_error() {
        let err = UsegraphError::Layout("node escaped".to_string());
        let reportable = to_reportable(&err);

        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Layout error: node escaped");
                assert_eq!(
                    e.code().map(|code| code.to_string()),
                    Some("usegraph::layout".to_string())
                );
            }
            Reportable::Decode(_) => panic!("Expected Error"),
        }
    }
}
