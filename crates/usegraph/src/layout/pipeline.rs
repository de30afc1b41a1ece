//! The five-phase layout pipeline.

use log::{debug, info};

use usegraph_core::model::GraphView;
use usegraph_dto::Diagnostic;

use super::{
    containers, packing,
    outcome::{Degradation, Phase},
    solver::LayoutSolver,
    subgraphs, subsystems,
};
use crate::config::LayoutConfig;

/// The finished result of one pipeline run.
#[derive(Debug, Clone)]
pub struct LayoutRun {
    view: GraphView,
    degradations: Vec<Degradation>,
    diagnostics: Vec<Diagnostic>,
}

impl LayoutRun {
    /// Attaches input diagnostics reported while decoding or validating the
    /// document this run was built from.
    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn view(&self) -> &GraphView {
        &self.view
    }

    pub fn into_view(self) -> GraphView {
        self.view
    }

    /// Scopes that were laid out with fallback geometry.
    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Runs the layout phases over a built graph.
///
/// Each run owns its graph. The solver is shared by every phase of the run
/// and called sequentially.
pub struct Pipeline<'a> {
    solver: &'a dyn LayoutSolver,
    config: &'a LayoutConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(solver: &'a dyn LayoutSolver, config: &'a LayoutConfig) -> Self {
        Self { solver, config }
    }

    /// Lays out `view` in place and returns it with the collected
    /// degradations.
    ///
    /// The run always reaches [`Phase::Bounded`]; solver failures only
    /// degrade the affected scope.
    pub fn run(&self, mut view: GraphView) -> LayoutRun {
        let mut degradations = Vec::new();
        self.enter(Phase::Built, &view);

        degradations.extend(containers::layout_containers(
            &mut view,
            self.solver,
            self.config,
        ));
        self.enter(Phase::IntraLaidOut, &view);

        packing::pack_containers(&mut view, self.config.packing());
        self.enter(Phase::Packed, &view);

        degradations.extend(subgraphs::layout_subgraphs(
            &mut view,
            self.solver,
            self.config.subgraphs(),
        ));
        self.enter(Phase::InterLaidOut, &view);

        subsystems::bound_subsystems(&mut view, self.config.subsystem());
        self.enter(Phase::Bounded, &view);

        if !degradations.is_empty() {
            info!(
                degraded = degradations.len();
                "Layout finished with fallback geometry"
            );
        }

        LayoutRun {
            view,
            degradations,
            diagnostics: Vec::new(),
        }
    }

    fn enter(&self, phase: Phase, view: &GraphView) {
        debug!(
            phase:% = phase,
            solver = self.solver.name(),
            nodes = view.nodes().len();
            "Layout phase complete"
        );
    }
}
