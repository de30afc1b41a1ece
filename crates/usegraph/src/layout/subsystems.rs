//! Subsystem bounding.
//!
//! Sizes every subsystem around its child subgraphs and moves those
//! children into the subsystem's frame. All boxes are computed from the
//! root-frame positions first; the translation happens once, afterwards.

use log::trace;

use usegraph_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    model::{GraphView, NodeKind},
};

use crate::config::SubsystemConfig;

/// Box of one subsystem and the children it encloses.
struct Enclosure {
    subsystem: Id,
    bounds: Option<Bounds>,
    children: Vec<Id>,
}

/// Positions and sizes subsystems, then makes their subgraphs relative to
/// them. Subsystems without subgraphs get the configured empty size.
pub fn bound_subsystems(view: &mut GraphView, config: &SubsystemConfig) {
    let margin = config.margin();

    let enclosures: Vec<Enclosure> = view
        .nodes()
        .iter()
        .filter(|node| node.kind() == NodeKind::Subsystem)
        .map(|subsystem| {
            let children: Vec<_> = view
                .children_of(subsystem.id())
                .filter(|node| node.kind() == NodeKind::Subgraph)
                .collect();
            let bounds = children
                .iter()
                .map(|child| child.bounds())
                .reduce(|acc, bounds| acc.merge(&bounds))
                .map(|content| {
                    let min = content.min_point().sub_point(Point::new(margin, margin));
                    let size = Size::new(
                        content.max_x() - min.x() + margin,
                        content.max_y() - min.y() + margin,
                    );
                    Bounds::new_from_top_left(min, size)
                });
            Enclosure {
                subsystem: subsystem.id(),
                bounds,
                children: children.iter().map(|child| child.id()).collect(),
            }
        })
        .collect();

    for enclosure in enclosures {
        let Some(bounds) = enclosure.bounds else {
            if let Some(node) = view.node_mut(enclosure.subsystem) {
                node.set_size(config.empty_size());
            }
            continue;
        };

        if let Some(node) = view.node_mut(enclosure.subsystem) {
            node.set_position(bounds.min_point());
            node.set_size(bounds.to_size());
        }
        for child in enclosure.children {
            if let Some(node) = view.node_mut(child) {
                node.set_position(node.position().sub_point(bounds.min_point()));
            }
        }
        trace!(subsystem:% = enclosure.subsystem, bounds:? = bounds; "Bounded subsystem");
    }
}
