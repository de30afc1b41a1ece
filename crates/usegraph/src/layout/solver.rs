//! The layout solver capability.
//!
//! A solver receives a flat graph of sized nodes and directed edges and
//! returns top-left positions for every node plus the bounding size of the
//! result, padding included. Layers run left to right. The layout phases
//! depend only on [`LayoutSolver`], so engines can be swapped, stubbed in
//! tests or forced to fail.

use std::collections::HashMap;

use thiserror::Error;

use usegraph_core::{
    geometry::{Insets, Point, Size},
    identifier::Id,
};

/// Why a solver call produced no usable layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("solver panicked: {0}")]
    Panicked(String),

    #[error("solver returned an empty result")]
    EmptyResult,

    #[error("solver returned no position for node `{0}`")]
    Unmapped(Id),

    #[error("solver rejected the graph: {0}")]
    Rejected(String),
}

/// A node handed to the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverNode {
    id: Id,
    size: Size,
}

impl SolverNode {
    pub fn new(id: Id, size: Size) -> Self {
        Self { id, size }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// A flat graph scoped to one solver call.
#[derive(Debug, Clone, Default)]
pub struct SolverGraph {
    nodes: Vec<SolverNode>,
    edges: Vec<(Id, Id)>,
}

impl SolverGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: Id, size: Size) {
        self.nodes.push(SolverNode::new(id, size));
    }

    pub fn add_edge(&mut self, source: Id, target: Id) {
        self.edges.push((source, target));
    }

    pub fn nodes(&self) -> &[SolverNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(Id, Id)] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Spacing settings for one solver call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Space around the laid-out nodes, included in the reported size.
    pub padding: Insets,
    /// Space between nodes of the same layer.
    pub node_spacing: f32,
    /// Space between adjacent layers.
    pub layer_spacing: f32,
}

/// Positions returned by a solver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverLayout {
    positions: HashMap<Id, Point>,
    size: Size,
}

impl SolverLayout {
    pub fn new(positions: HashMap<Id, Point>, size: Size) -> Self {
        Self { positions, size }
    }

    pub fn position(&self, id: Id) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Bounding size of the layout, padding included.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Checks that every node of `graph` received a position.
    pub fn ensure_complete(&self, graph: &SolverGraph) -> Result<(), SolverError> {
        match graph
            .nodes()
            .iter()
            .find(|node| !self.positions.contains_key(&node.id()))
        {
            Some(node) => Err(SolverError::Unmapped(node.id())),
            None => Ok(()),
        }
    }
}

/// Computes positions for a flat graph.
///
/// Implementations must be deterministic and safe to call repeatedly; one
/// instance serves every call of a pipeline run.
pub trait LayoutSolver {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Lay out `graph` from left to right.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] when no layout could be produced. Callers
    /// fall back to a deterministic placement.
    fn layout(
        &self,
        graph: &SolverGraph,
        options: &SolverOptions,
    ) -> Result<SolverLayout, SolverError>;
}
