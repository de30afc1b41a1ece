//! Usegraph - Hierarchical layout of audio use case graphs.
//!
//! Turns a use case document (modules, subsystems, data and control links)
//! into a positioned [`GraphView`](model::GraphView): subsystems enclose
//! subgraphs, subgraphs enclose container segments, and container segments
//! enclose modules. Every position is relative to the node's parent.

pub mod config;
pub mod layout;
pub mod structure;

mod error;

pub use usegraph_core::{LayoutEngine, geometry, identifier, model};
pub use usegraph_dto::{Decoded, Diagnostic, UsecaseDto};

pub use error::UsegraphError;

use log::{debug, error, info, trace, warn};

use config::AppConfig;
use layout::{LayoutRun, LayoutSolver, Pipeline};

/// Builder for decoding and laying out use case graphs.
///
/// # Examples
///
/// ```rust
/// use usegraph::{ViewBuilder, config::AppConfig};
///
/// let source = r#"{
///     "moduleInstances": [
///         {"id": 1, "name": "mic", "containerId": 1, "subgraphId": 1},
///         {"id": 2, "name": "gain", "containerId": 1, "subgraphId": 1}
///     ],
///     "dataLinks": [
///         {"sourceId": 1, "sourcePortId": 10, "destinationId": 2, "destinationPortId": 20}
///     ]
/// }"#;
///
/// let builder = ViewBuilder::new(AppConfig::default());
/// let decoded = builder.decode(source).expect("Failed to decode");
/// let run = builder.layout(&decoded.dto);
///
/// assert_eq!(run.view().nodes().len(), 4);
/// assert!(builder.validate(&run).is_ok());
/// ```
#[derive(Default)]
pub struct ViewBuilder {
    config: AppConfig,
}

impl ViewBuilder {
    /// Create a new view builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Decode JSON text into a use case document.
    ///
    /// Structurally unexpected input is coerced, not rejected; each
    /// substitution is returned as a diagnostic.
    ///
    /// # Errors
    ///
    /// Returns `UsegraphError::Decode` if `source` is not valid JSON.
    pub fn decode(&self, source: &str) -> Result<Decoded, UsegraphError> {
        info!("Decoding use case document");

        let decoded = usegraph_dto::decode_str(source)
            .map_err(|err| UsegraphError::new_decode_error(err, source))?;

        debug!(
            modules = decoded.dto.module_instances.len(),
            diagnostics = decoded.diagnostics.len();
            "Use case decoded"
        );
        Ok(decoded)
    }

    /// Build and lay out a use case with the configured engine.
    ///
    /// This never fails. Solver failures degrade the affected scope to a
    /// fallback placement and are listed in [`LayoutRun::degradations`].
    pub fn layout(&self, dto: &UsecaseDto) -> LayoutRun {
        let solver = layout::solver(self.config.layout().engine());
        self.layout_with(dto, solver.as_ref())
    }

    /// Build and lay out a use case with an explicit solver.
    pub fn layout_with(&self, dto: &UsecaseDto, solver: &dyn LayoutSolver) -> LayoutRun {
        let diagnostics = usegraph_dto::validate(dto);

        info!(modules = dto.module_instances.len(); "Building use case graph");
        let view = structure::build(dto);
        trace!(view:?; "Built graph");

        info!(solver = solver.name(); "Laying out use case graph");
        let run = Pipeline::new(solver, self.config.layout()).run(view);

        for violation in run.view().dangling_edges() {
            warn!(violation:%; "Edge endpoint has no node");
        }

        info!(
            nodes = run.view().nodes().len(),
            edges = run.view().edges().len(),
            degraded = run.degradations().len();
            "Layout calculated"
        );
        run.with_diagnostics(diagnostics)
    }

    /// Check the structural invariants of a finished layout.
    ///
    /// # Errors
    ///
    /// Returns `UsegraphError::Layout` listing the number of violations;
    /// each violation is logged.
    pub fn validate(&self, run: &LayoutRun) -> Result<(), UsegraphError> {
        match run.view().validate(self.config.layout().epsilon()) {
            Ok(()) => Ok(()),
            Err(violations) => {
                for violation in &violations {
                    error!(violation:%; "Layout invariant violated");
                }
                Err(UsegraphError::Layout(format!(
                    "{} layout invariant violation(s), first: {}",
                    violations.len(),
                    violations[0]
                )))
            }
        }
    }

    /// Serialize the positioned view as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `UsegraphError::Export` if serialization fails.
    pub fn export_json(&self, run: &LayoutRun) -> Result<String, UsegraphError> {
        Ok(serde_json::to_string_pretty(run.view())?)
    }

    /// Decode, lay out, validate and serialize in one step.
    ///
    /// The returned run carries both decoding and data-quality diagnostics.
    ///
    /// # Errors
    ///
    /// Returns `UsegraphError` for invalid JSON, invariant violations or
    /// serialization failures.
    pub fn layout_json(&self, source: &str) -> Result<(LayoutRun, String), UsegraphError> {
        let Decoded { dto, diagnostics } = self.decode(source)?;
        let run = self.layout(&dto);

        let diagnostics = diagnostics
            .into_iter()
            .chain(run.diagnostics().iter().cloned())
            .collect();
        let run = run.with_diagnostics(diagnostics);

        self.validate(&run)?;
        let json = self.export_json(&run)?;
        info!(bytes = json.len(); "View exported");
        Ok((run, json))
    }
}
