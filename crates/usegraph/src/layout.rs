//! Layout of built use case graphs.
//!
//! This module positions and sizes every node of a [`GraphView`] produced by
//! the structure builder. It runs five phases in a fixed order, each reading
//! the previous phase's output and writing only its own node subset.
//!
//! # Pipeline Position
//!
//! ```text
//! UsecaseDto
//!     ↓ structure
//! GraphView (unpositioned)
//!     ↓ layout (this module)
//! GraphView (positioned)
//!     ↓ export
//! JSON
//! ```
//!
//! # Phases
//!
//! 1. [`containers`] - Module placement inside each container segment.
//! 2. [`packing`] - Shelf packing of container segments into subgraphs.
//! 3. [`subgraphs`] - Placement of subgraphs and pipeline stacking.
//! 4. [`subsystems`] - Subsystem boxes and the frame change of their subgraphs.
//!
//! Phases that call a [`LayoutSolver`] return an [`Outcome`] per scope and
//! fall back to a deterministic row placement when the solver fails.
//!
//! [`GraphView`]: usegraph_core::model::GraphView

pub mod containers;
mod engines;
mod outcome;
pub mod packing;
mod pipeline;
mod solver;
pub mod subgraphs;
pub mod subsystems;

pub use engines::{BasicEngine, SugiyamaEngine, solver};
pub use outcome::{Degradation, Outcome, Phase};
pub use pipeline::{LayoutRun, Pipeline};
pub use solver::{LayoutSolver, SolverError, SolverGraph, SolverLayout, SolverNode, SolverOptions};
