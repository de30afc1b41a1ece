//! The positioned graph handed to the renderer.
//!
//! [`GraphView`] is an arena: nodes live in one flat vector, parent
//! references are [`Id`]s and an index map resolves them. Parents are always
//! pushed before their children, which the renderer relies on for ordered,
//! non-recursive containment matching.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::{
    geometry::{Bounds, Point},
    identifier::Id,
    model::{Edge, Node},
};

/// A structural problem found by [`GraphView::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("node `{node}` appears before its parent `{parent}`")]
    ParentAfterChild { node: Id, parent: Id },

    #[error("node `{node}` references missing parent `{parent}`")]
    MissingParent { node: Id, parent: Id },

    #[error("node `{node}` exceeds the bounds of its parent `{parent}`")]
    OutOfBounds { node: Id, parent: Id },

    #[error("edge `{edge}` references missing node `{node}`")]
    DanglingEdge { edge: Id, node: Id },
}

// =============================================================================
// GraphView
// =============================================================================

/// Flat node and edge collections with id lookup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphView {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: HashMap<Id, usize>,
}

impl GraphView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its arena index.
    ///
    /// A node id that is already present is replaced in the lookup index by
    /// the newest node.
    pub fn push_node(&mut self, node: Node) -> usize {
        debug_assert!(
            node.parent().is_none_or(|parent| self.index.contains_key(&parent)),
            "parent must be pushed before child"
        );
        let idx = self.nodes.len();
        self.index.insert(node.id(), idx);
        self.nodes.push(node);
        idx
    }

    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn index_of(&self, id: Id) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    pub fn node_mut(&mut self, id: Id) -> Option<&mut Node> {
        self.index_of(id).map(|idx| &mut self.nodes[idx])
    }

    /// Returns the direct children of `parent`, in arena order.
    pub fn children_of(&self, parent: Id) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(move |node| node.parent() == Some(parent))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Returns the absolute top-left position of a node by walking its
    /// parent chain.
    pub fn absolute_position(&self, id: Id) -> Option<Point> {
        let mut node = self.node(id)?;
        let mut position = node.position();
        while let Some(parent) = node.parent() {
            node = self.node(parent)?;
            position = position.add_point(node.position());
        }
        Some(position)
    }

    /// Returns the edges whose endpoints name no node in the view.
    pub fn dangling_edges(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        for edge in &self.edges {
            for node in [edge.source(), edge.target()] {
                if !self.index.contains_key(&node) {
                    violations.push(Violation::DanglingEdge {
                        edge: edge.id(),
                        node,
                    });
                }
            }
        }
        violations
    }

    /// Checks the structural invariants of a finished view.
    ///
    /// Every parent must exist and precede its children, and every child
    /// must fit inside its parent's `[0, size]` frame within `epsilon`.
    /// Edge endpoints are not checked; see [`GraphView::dangling_edges`].
    pub fn validate(&self, epsilon: f32) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();

        for (idx, node) in self.nodes.iter().enumerate() {
            let Some(parent_id) = node.parent() else {
                continue;
            };
            let Some(parent_idx) = self.index_of(parent_id) else {
                violations.push(Violation::MissingParent {
                    node: node.id(),
                    parent: parent_id,
                });
                continue;
            };
            if parent_idx >= idx {
                violations.push(Violation::ParentAfterChild {
                    node: node.id(),
                    parent: parent_id,
                });
            }

            let frame = Bounds::new_from_top_left(Point::default(), self.nodes[parent_idx].size());
            if !frame.contains(&node.bounds(), epsilon) {
                violations.push(Violation::OutOfBounds {
                    node: node.id(),
                    parent: parent_id,
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::Size,
        model::{ContainerData, EdgeKind, NodeData, SubgraphData},
    };

    fn subgraph(id: i64) -> Node {
        Node::new(
            Id::scoped("subgraph", id),
            None,
            NodeData::Subgraph(SubgraphData {
                subgraph_id: id,
                subsystem_id: None,
                label: format!("Subgraph {id}"),
            }),
        )
    }

    fn container(id: i64, subgraph: i64) -> Node {
        Node::new(
            Id::new(&format!("container-{id}:{subgraph}")),
            Some(Id::scoped("subgraph", subgraph)),
            NodeData::Container(ContainerData {
                container_id: id,
                subgraph_id: subgraph,
                label: format!("Container {id}"),
            }),
        )
    }

    fn placed(mut node: Node, position: Point, size: Size) -> Node {
        node.set_position(position);
        node.set_size(size);
        node
    }

    #[test]
    fn test_push_and_lookup() {
        let mut view = GraphView::new();
        view.push_node(subgraph(1));
        view.push_node(container(7, 1));

        assert_eq!(view.index_of(Id::new("container-7:1")), Some(1));
        assert_eq!(view.children_of(Id::new("subgraph-1")).count(), 1);
        assert!(view.node(Id::new("container-7:2")).is_none());
    }

    #[test]
    fn test_validate_accepts_contained_children() {
        let mut view = GraphView::new();
        view.push_node(placed(subgraph(1), Point::new(300.0, 50.0), Size::new(200.0, 150.0)));
        view.push_node(placed(container(7, 1), Point::new(25.0, 45.0), Size::new(150.0, 80.0)));

        assert_eq!(view.validate(0.5), Ok(()));
        assert_eq!(
            view.absolute_position(Id::new("container-7:1")),
            Some(Point::new(325.0, 95.0))
        );
    }

    #[test]
    fn test_validate_reports_overflow() {
        let mut view = GraphView::new();
        view.push_node(placed(subgraph(1), Point::default(), Size::new(100.0, 100.0)));
        view.push_node(placed(container(7, 1), Point::new(50.0, 0.0), Size::new(60.0, 10.0)));

        let violations = view.validate(0.5).unwrap_err();
        assert_eq!(
            violations,
            vec![Violation::OutOfBounds {
                node: Id::new("container-7:1"),
                parent: Id::new("subgraph-1"),
            }]
        );
    }

    #[test]
    fn test_dangling_edges() {
        let mut view = GraphView::new();
        view.push_node(subgraph(1));
        view.push_edge(Edge::new(
            Id::new("e-data-subgraph-1-module-9-0"),
            EdgeKind::Data,
            (Id::new("subgraph-1"), "Data:1".to_string()),
            (Id::new("module-9"), "Data:2".to_string()),
        ));

        let violations = view.dangling_edges();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "edge `e-data-subgraph-1-module-9-0` references missing node `module-9`"
        );
    }

    #[test]
    fn test_serialize_skips_index() {
        let mut view = GraphView::new();
        view.push_node(subgraph(2));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["nodes"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["edges"].as_array().map(Vec::len), Some(0));
        assert!(json.get("index").is_none());
    }
}
