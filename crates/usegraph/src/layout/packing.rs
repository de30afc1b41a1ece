//! Container packing.
//!
//! Shelf-packs the container segments of each subgraph left to right in
//! arena order and sizes the subgraph around them. There is no solver call;
//! x offsets increase monotonically so segments never overlap.

use log::trace;

use usegraph_core::{
    geometry::{Point, Size},
    identifier::Id,
    model::{GraphView, NodeKind},
};

use crate::config::PackingConfig;

/// Positions every container segment inside its subgraph and sizes the
/// subgraphs.
pub fn pack_containers(view: &mut GraphView, config: &PackingConfig) {
    let subgraphs: Vec<Id> = view
        .nodes()
        .iter()
        .filter(|node| node.kind() == NodeKind::Subgraph)
        .map(|node| node.id())
        .collect();

    for subgraph in subgraphs {
        let containers: Vec<(Id, Size)> = view
            .children_of(subgraph)
            .filter(|node| node.kind() == NodeKind::Container)
            .map(|node| (node.id(), node.size()))
            .collect();

        let (positions, size) = pack(&containers, config);
        for (container, position) in positions {
            if let Some(node) = view.node_mut(container) {
                node.set_position(position);
            }
        }
        if let Some(node) = view.node_mut(subgraph) {
            node.set_size(size);
        }
        trace!(subgraph:% = subgraph, size:? = size; "Packed subgraph");
    }
}

/// Packs sized containers into one shelf, returning their positions and the
/// enclosing size.
fn pack(containers: &[(Id, Size)], config: &PackingConfig) -> (Vec<(Id, Point)>, Size) {
    let top = config.padding() + config.header();
    let mut x = config.padding();
    let mut max_height: f32 = 0.0;

    let mut positions = Vec::with_capacity(containers.len());
    for &(container, size) in containers {
        positions.push((container, Point::new(x, top)));
        x += size.width() + config.gap();
        max_height = max_height.max(size.height());
    }

    let size = Size::new(
        x + config.right_margin(),
        top + max_height + config.bottom_margin(),
    );
    (positions, size)
}
