//! Layout engine selection.
//!
//! Maps a configured [`LayoutEngine`] to the [`LayoutSolver`] that runs it.
//! One solver instance is created per pipeline run and reused by every
//! phase that needs it.

mod basic;
mod sugiyama;

use log::trace;

use usegraph_core::LayoutEngine;

use super::solver::LayoutSolver;

pub use basic::Engine as BasicEngine;
pub use sugiyama::Engine as SugiyamaEngine;

/// Creates the solver for `engine`.
pub fn solver(engine: LayoutEngine) -> Box<dyn LayoutSolver> {
    trace!(engine:% = engine; "Creating layout solver");
    match engine {
        LayoutEngine::Basic => Box::new(BasicEngine::new()),
        LayoutEngine::Sugiyama => Box::new(SugiyamaEngine::new()),
    }
}
