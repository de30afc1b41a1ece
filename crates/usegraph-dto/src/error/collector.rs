//! Collector for accumulating diagnostics while decoding or validating.
//!
//! Every emitted diagnostic is also written to the log: errors at `error!`,
//! warnings at `warn!`.

use log::{error, warn};

use crate::error::Diagnostic;

/// A collector for accumulating diagnostics during a processing phase.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        let code = diagnostic.code().map_or("", |code| code.as_str());
        let path = diagnostic.path().unwrap_or("");
        if diagnostic.severity().is_error() {
            error!(code, path; "{}", diagnostic.message());
        } else {
            warn!(code, path; "{}", diagnostic.message());
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection and return every diagnostic in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
