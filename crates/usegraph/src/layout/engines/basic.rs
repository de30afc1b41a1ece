//! Basic layout solver.
//!
//! Places every node in a single row, in input order, aligned to the top of
//! the padded area. Edges are ignored, so this solver never fails.

use std::collections::HashMap;

use log::debug;

use usegraph_core::geometry::{Point, Size};

use crate::layout::solver::{LayoutSolver, SolverError, SolverGraph, SolverLayout, SolverOptions};

/// Single-row layout solver.
#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutSolver for Engine {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn layout(
        &self,
        graph: &SolverGraph,
        options: &SolverOptions,
    ) -> Result<SolverLayout, SolverError> {
        let padding = options.padding;
        let mut positions = HashMap::with_capacity(graph.nodes().len());
        let mut x = padding.left();
        let mut content = Size::default();

        for (idx, node) in graph.nodes().iter().enumerate() {
            if idx > 0 {
                x += options.node_spacing;
            }
            positions.insert(node.id(), Point::new(x, padding.top()));
            x += node.size().width();
            content = Size::new(x - padding.left(), content.height().max(node.size().height()));
        }

        debug!(nodes = graph.nodes().len(); "Basic layout placed nodes in one row");
        Ok(SolverLayout::new(positions, content.add_padding(padding)))
    }
}

#[cfg(test)]
mod tests {
    use usegraph_core::{geometry::Insets, identifier::Id};

    use super::*;

    #[test]
    fn test_single_row() {
        let mut graph = SolverGraph::new();
        graph.add_node(Id::new("a"), Size::new(100.0, 60.0));
        graph.add_node(Id::new("b"), Size::new(50.0, 80.0));
        graph.add_edge(Id::new("b"), Id::new("a"));

        let options = SolverOptions {
            padding: Insets::new(10.0, 5.0, 10.0, 5.0),
            node_spacing: 20.0,
            layer_spacing: 99.0,
        };
        let layout = Engine::new().layout(&graph, &options).unwrap();

        assert_eq!(layout.position(Id::new("a")), Some(Point::new(5.0, 10.0)));
        assert_eq!(layout.position(Id::new("b")), Some(Point::new(125.0, 10.0)));
        assert_eq!(layout.size(), Size::new(180.0, 100.0));
    }

    #[test]
    fn test_empty_graph() {
        let options = SolverOptions {
            padding: Insets::uniform(10.0),
            node_spacing: 20.0,
            layer_spacing: 20.0,
        };
        let layout = Engine::new().layout(&SolverGraph::new(), &options).unwrap();
        assert_eq!(layout.size(), Size::new(20.0, 20.0));
    }
}
