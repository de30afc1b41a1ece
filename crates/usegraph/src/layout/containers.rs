//! Intra-container layout.
//!
//! Modules are grouped by their container segment and each group is handed
//! to the solver on its own, together with the edges whose endpoints both lie
//! inside the group. Module positions are container-relative; the container
//! segment is sized from the solver's bounding size plus a fixed inset.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, error};

use usegraph_core::{
    geometry::{Point, Size},
    identifier::Id,
    model::{GraphView, NodeKind},
};

use super::{
    outcome::{Degradation, Outcome, Phase},
    solver::{LayoutSolver, SolverGraph, SolverOptions},
};
use crate::config::{ContainerConfig, LayoutConfig};

/// Module positions and the resulting size of one container segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLayout {
    positions: Vec<(Id, Point)>,
    size: Size,
}

impl SegmentLayout {
    pub fn positions(&self) -> &[(Id, Point)] {
        &self.positions
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// Lays out every container segment of `view`.
///
/// Sets each module's size and container-relative position and each
/// container segment's size. Returns one [`Degradation`] per segment that
/// fell back to the row placement.
pub fn layout_containers(
    view: &mut GraphView,
    solver: &dyn LayoutSolver,
    config: &LayoutConfig,
) -> Vec<Degradation> {
    let module_size = config.module_size();

    let mut segments: IndexMap<Id, Vec<Id>> = IndexMap::new();
    for node in view.nodes_mut() {
        if node.kind() != NodeKind::Module {
            continue;
        }
        node.set_size(module_size);
        if let Some(parent) = node.parent() {
            segments.entry(parent).or_default().push(node.id());
        }
    }

    let mut degradations = Vec::new();
    for (segment, modules) in segments {
        let members: HashSet<Id> = modules.iter().copied().collect();
        let edges: Vec<(Id, Id)> = view
            .edges()
            .iter()
            .filter(|edge| members.contains(&edge.source()) && members.contains(&edge.target()))
            .map(|edge| (edge.source(), edge.target()))
            .collect();

        let outcome = layout_segment(segment, &modules, &edges, solver, config);
        if let Some(reason) = outcome.reason() {
            degradations.push(Degradation::new(
                Phase::IntraLaidOut,
                segment,
                reason.clone(),
            ));
        }

        let layout = outcome.into_value();
        for &(module, position) in layout.positions() {
            if let Some(node) = view.node_mut(module) {
                node.set_position(position);
            }
        }
        if let Some(node) = view.node_mut(segment) {
            node.set_size(layout.size());
        }
    }

    degradations
}

/// Lays out the modules of a single container segment.
///
/// `edges` must only reference ids in `modules`.
pub fn layout_segment(
    segment: Id,
    modules: &[Id],
    edges: &[(Id, Id)],
    solver: &dyn LayoutSolver,
    config: &LayoutConfig,
) -> Outcome<SegmentLayout> {
    let container = config.container();

    let mut graph = SolverGraph::new();
    for &module in modules {
        graph.add_node(module, config.module_size());
    }
    for &(source, target) in edges {
        graph.add_edge(source, target);
    }

    let options = SolverOptions {
        padding: container.padding(),
        node_spacing: container.node_spacing(),
        layer_spacing: container.layer_spacing(),
    };

    debug!(
        segment:% = segment,
        modules = modules.len(),
        edges = edges.len(),
        solver = solver.name();
        "Laying out container segment"
    );

    let result = solver
        .layout(&graph, &options)
        .and_then(|layout| layout.ensure_complete(&graph).map(|()| layout));

    match result {
        Ok(layout) => {
            let positions: Vec<(Id, Point)> = modules
                .iter()
                .map(|&module| (module, layout.position(module).unwrap_or_default()))
                .collect();

            // Never smaller than the placed modules plus padding.
            let padding = container.padding();
            let extent = positions.iter().fold(Size::default(), |extent, &(_, position)| {
                extent.max(Size::new(
                    position.x() + config.module_size().width() + padding.right(),
                    position.y() + config.module_size().height() + padding.bottom(),
                ))
            });
            let inset = container.size_inset();
            let content = layout.size().max(extent);
            let size = Size::new(
                content.width() + inset.width(),
                content.height() + inset.height(),
            );
            Outcome::Ok(SegmentLayout { positions, size })
        }
        Err(reason) => {
            error!(
                segment:% = segment,
                reason:% = reason;
                "Container layout failed, using row fallback"
            );
            Outcome::Degraded {
                value: fallback(modules, config.module_size(), container),
                reason,
            }
        }
    }
}

/// Places modules in one row at a fixed pitch.
fn fallback(modules: &[Id], module_size: Size, config: &ContainerConfig) -> SegmentLayout {
    let origin = config.fallback_origin();
    let pitch = module_size.width() + config.node_spacing();

    let positions = modules
        .iter()
        .enumerate()
        .map(|(idx, &module)| {
            (
                module,
                Point::new(origin.x() + idx as f32 * pitch, origin.y()),
            )
        })
        .collect();
    let size = Size::new(
        2.0 * origin.x() + modules.len() as f32 * pitch,
        origin.y() + module_size.height() + config.fallback_bottom(),
    );

    SegmentLayout { positions, size }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::solver::{SolverError, SolverLayout};

    struct Failing;

    impl LayoutSolver for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn layout(&self, _: &SolverGraph, _: &SolverOptions) -> Result<SolverLayout, SolverError> {
            Err(SolverError::Rejected("forced".to_string()))
        }
    }

    /// Reports a position for the first node only.
    struct Partial;

    impl LayoutSolver for Partial {
        fn name(&self) -> &'static str {
            "partial"
        }

        fn layout(
            &self,
            graph: &SolverGraph,
            _: &SolverOptions,
        ) -> Result<SolverLayout, SolverError> {
            let positions = graph
                .nodes()
                .iter()
                .take(1)
                .map(|node| (node.id(), Point::default()))
                .collect();
            Ok(SolverLayout::new(positions, Size::new(10.0, 10.0)))
        }
    }

    fn modules(count: usize) -> Vec<Id> {
        (0..count)
            .map(|idx| Id::scoped("module", idx))
            .collect()
    }

    #[test]
    fn test_fallback_row() {
        let config = LayoutConfig::default();
        let modules = modules(3);
        let outcome = layout_segment(Id::new("container-1:1"), &modules, &[], &Failing, &config);

        assert!(outcome.is_degraded());
        let layout = outcome.into_value();
        assert_eq!(
            layout.positions(),
            [
                (modules[0], Point::new(15.0, 40.0)),
                (modules[1], Point::new(140.0, 40.0)),
                (modules[2], Point::new(265.0, 40.0)),
            ]
        );
        assert_eq!(layout.size(), Size::new(405.0, 120.0));
    }

    #[test]
    fn test_incomplete_result_falls_back() {
        let config = LayoutConfig::default();
        let outcome = layout_segment(Id::new("container-1:1"), &modules(2), &[], &Partial, &config);

        assert!(matches!(outcome.reason(), Some(SolverError::Unmapped(_))));
    }

    #[test]
    fn test_solver_size_gets_inset() {
        let config = LayoutConfig::default();
        let outcome = layout_segment(
            Id::new("container-1:1"),
            &modules(1),
            &[],
            &crate::layout::engines::BasicEngine::new(),
            &config,
        );

        assert!(!outcome.is_degraded());
        let layout = outcome.into_value();
        // 100x60 module, padding 25/15/15/20, inset 12.5x15
        assert_eq!(layout.size(), Size::new(147.5, 115.0));
        assert_eq!(layout.positions()[0].1, Point::new(20.0, 25.0));
    }
}
