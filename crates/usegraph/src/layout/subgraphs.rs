//! Inter-subgraph layout.
//!
//! Every subgraph becomes one sized solver node. Module-level links whose
//! endpoints lie in different subgraphs are reduced to at most one directed
//! connection per subgraph pair, and the solver is called once over that
//! reduced graph.
//!
//! The result is then regrouped into pipelines, the weakly connected
//! components of the reduced graph. Each pipeline gets its own padded block,
//! blocks are stacked top to bottom, and subgraphs of a pipeline whose `y`
//! coordinates are close are snapped onto a common row.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, error};
use petgraph::{graphmap::DiGraphMap, unionfind::UnionFind};

use usegraph_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    model::{GraphView, NodeKind},
};

use super::{
    outcome::{Degradation, Outcome, Phase},
    solver::{LayoutSolver, SolverGraph, SolverLayout, SolverOptions},
};
use crate::config::SubgraphConfig;

/// Scope name used for degradations of this phase.
pub const SCOPE: &str = "subgraphs";

/// Assigns root-frame positions to every subgraph of `view`.
///
/// Returns a [`Degradation`] when the solver failed and the fallback row
/// was used.
pub fn layout_subgraphs(
    view: &mut GraphView,
    solver: &dyn LayoutSolver,
    config: &SubgraphConfig,
) -> Option<Degradation> {
    let subgraphs: Vec<(Id, Size)> = view
        .nodes()
        .iter()
        .filter(|node| node.kind() == NodeKind::Subgraph)
        .map(|node| (node.id(), node.size()))
        .collect();
    if subgraphs.is_empty() {
        return None;
    }

    let connections = connections(view, &subgraphs);
    debug!(
        subgraphs = subgraphs.len(),
        connections = connections.len(),
        solver = solver.name();
        "Laying out subgraphs"
    );

    let outcome = place(&subgraphs, &connections, solver, config);
    let degradation = outcome
        .reason()
        .map(|reason| Degradation::new(Phase::InterLaidOut, Id::new(SCOPE), reason.clone()));

    for ((subgraph, _), position) in subgraphs.iter().zip(outcome.into_value()) {
        if let Some(node) = view.node_mut(*subgraph) {
            node.set_position(position);
        }
    }

    degradation
}

/// Reduces module-level links to directed subgraph connections.
///
/// Returns deduplicated `(source, target)` pairs of indices into
/// `subgraphs`, in first-seen order. Links touching anything other than a
/// module, or staying inside one subgraph, are ignored.
pub fn connections(view: &GraphView, subgraphs: &[(Id, Size)]) -> Vec<(usize, usize)> {
    let index: HashMap<Id, usize> = subgraphs
        .iter()
        .enumerate()
        .map(|(idx, &(id, _))| (id, idx))
        .collect();

    // module -> container -> subgraph
    let subgraph_of = |module: Id| -> Option<usize> {
        let node = view.node(module)?;
        if node.kind() != NodeKind::Module {
            return None;
        }
        let container = view.node(node.parent()?)?;
        index.get(&container.parent()?).copied()
    };

    let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
    for edge in view.edges() {
        let (Some(source), Some(target)) = (subgraph_of(edge.source()), subgraph_of(edge.target()))
        else {
            continue;
        };
        if source != target {
            graph.add_edge(source, target, ());
        }
    }

    graph
        .all_edges()
        .map(|(source, target, _)| (source, target))
        .collect()
}

/// Computes a position for each subgraph, in input order.
fn place(
    subgraphs: &[(Id, Size)],
    connections: &[(usize, usize)],
    solver: &dyn LayoutSolver,
    config: &SubgraphConfig,
) -> Outcome<Vec<Point>> {
    let mut graph = SolverGraph::new();
    for &(id, size) in subgraphs {
        graph.add_node(id, size);
    }
    for &(source, target) in connections {
        graph.add_edge(subgraphs[source].0, subgraphs[target].0);
    }

    let options = SolverOptions {
        padding: config.padding(),
        node_spacing: config.node_spacing(),
        layer_spacing: config.layer_spacing(),
    };

    let result = solver
        .layout(&graph, &options)
        .and_then(|layout| layout.ensure_complete(&graph).map(|()| layout));

    match result {
        Ok(layout) => Outcome::Ok(stack_pipelines(subgraphs, connections, &layout, config)),
        Err(reason) => {
            error!(
                scope = SCOPE,
                reason:% = reason;
                "Subgraph layout failed, using row fallback"
            );
            Outcome::Degraded {
                value: fallback(subgraphs, config),
                reason,
            }
        }
    }
}

/// Splits the subgraphs into weakly connected components, in order of
/// their first member.
pub fn pipelines(count: usize, connections: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut components = UnionFind::new(count);
    for &(source, target) in connections {
        components.union(source, target);
    }

    let mut pipelines: IndexMap<usize, Vec<usize>> = IndexMap::new();
    for idx in 0..count {
        pipelines.entry(components.find(idx)).or_default().push(idx);
    }
    pipelines.into_values().collect()
}

/// Moves each pipeline into its own padded block and stacks the blocks.
fn stack_pipelines(
    subgraphs: &[(Id, Size)],
    connections: &[(usize, usize)],
    layout: &SolverLayout,
    config: &SubgraphConfig,
) -> Vec<Point> {
    let padding = config.padding();
    let mut positions: Vec<Point> = subgraphs
        .iter()
        .map(|&(id, _)| layout.position(id).unwrap_or_default())
        .collect();

    let pipelines = pipelines(subgraphs.len(), connections);
    debug!(pipelines = pipelines.len(); "Stacking subgraph pipelines");

    let mut cursor_y: f32 = 0.0;
    for pipeline in &pipelines {
        align_rows(pipeline, subgraphs, &mut positions, config.row_tolerance());

        let Some(bounds) = pipeline
            .iter()
            .map(|&idx| Bounds::new_from_top_left(positions[idx], subgraphs[idx].1))
            .reduce(|acc, bounds| acc.merge(&bounds))
        else {
            continue;
        };

        let origin = Point::new(padding.left(), cursor_y + padding.top());
        for &idx in pipeline {
            positions[idx] = positions[idx].sub_point(bounds.min_point()).add_point(origin);
        }
        cursor_y += bounds.height() + padding.vertical_sum() + config.pipeline_gap();
    }

    positions
}

/// Snaps subgraphs of one pipeline with similar `y` onto their mean `y`.
///
/// The first unprocessed member seeds a row and pulls in every later member
/// within `tolerance` of it that shares no horizontal extent with the row.
/// A row is only snapped if its members would not overlap other members.
fn align_rows(pipeline: &[usize], subgraphs: &[(Id, Size)], positions: &mut [Point], tolerance: f32) {
    let bounds = |positions: &[Point], idx: usize| {
        Bounds::new_from_top_left(positions[idx], subgraphs[idx].1)
    };

    let mut processed = vec![false; pipeline.len()];
    for seed in 0..pipeline.len() {
        if processed[seed] {
            continue;
        }
        processed[seed] = true;

        let seed_y = positions[pipeline[seed]].y();
        let mut row = vec![pipeline[seed]];
        for other in seed + 1..pipeline.len() {
            let candidate = pipeline[other];
            if processed[other] || (positions[candidate].y() - seed_y).abs() > tolerance {
                continue;
            }
            let candidate_bounds = bounds(positions, candidate);
            if row
                .iter()
                .any(|&member| bounds(positions, member).overlaps_horizontally(&candidate_bounds))
            {
                continue;
            }
            processed[other] = true;
            row.push(candidate);
        }
        if row.len() < 2 {
            continue;
        }

        let mean_y = row.iter().map(|&idx| positions[idx].y()).sum::<f32>() / row.len() as f32;
        let collides = row.iter().any(|&member| {
            let snapped = Bounds::new_from_top_left(positions[member].with_y(mean_y), subgraphs[member].1);
            pipeline
                .iter()
                .filter(|&&idx| !row.contains(&idx))
                .any(|&idx| intersects(&snapped, &bounds(positions, idx)))
        });
        if collides {
            continue;
        }
        for &member in &row {
            positions[member] = positions[member].with_y(mean_y);
        }
    }
}

fn intersects(a: &Bounds, b: &Bounds) -> bool {
    a.overlaps_horizontally(b) && a.min_y() < b.max_y() && b.min_y() < a.max_y()
}

/// Places subgraphs in one row at a fixed pitch.
///
/// The pitch grows to the widest subgraph plus node spacing so that the
/// row never overlaps.
fn fallback(subgraphs: &[(Id, Size)], config: &SubgraphConfig) -> Vec<Point> {
    let origin = config.fallback_origin();
    let widest = subgraphs
        .iter()
        .map(|&(_, size)| size.width())
        .fold(0.0, f32::max);
    let pitch = config.fallback_pitch().max(widest + config.node_spacing());

    (0..subgraphs.len())
        .map(|idx| Point::new(origin.x() + idx as f32 * pitch, origin.y()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(count: usize, size: Size) -> Vec<(Id, Size)> {
        (0..count)
            .map(|idx| (Id::scoped("subgraph", idx), size))
            .collect()
    }

    #[test]
    fn test_pipelines() {
        let pipelines = pipelines(5, &[(3, 1), (0, 4)]);
        assert_eq!(pipelines, vec![vec![0, 4], vec![1, 3], vec![2]]);
    }

    #[test]
    fn test_fallback_pitch() {
        let config = SubgraphConfig::default();
        let positions = fallback(&sized(2, Size::new(200.0, 100.0)), &config);
        assert_eq!(positions, [Point::new(50.0, 50.0), Point::new(900.0, 50.0)]);

        let positions = fallback(&sized(2, Size::new(1000.0, 100.0)), &config);
        assert_eq!(positions[1], Point::new(1100.0, 50.0));
    }

    #[test]
    fn test_align_rows_snaps_to_mean() {
        let subgraphs = sized(2, Size::new(100.0, 100.0));
        let mut positions = vec![Point::new(0.0, 0.0), Point::new(200.0, 40.0)];

        align_rows(&[0, 1], &subgraphs, &mut positions, 50.0);

        assert_eq!(positions, [Point::new(0.0, 20.0), Point::new(200.0, 20.0)]);
    }

    #[test]
    fn test_align_rows_keeps_stacked_columns() {
        let subgraphs = sized(2, Size::new(100.0, 100.0));
        let mut positions = vec![Point::new(0.0, 0.0), Point::new(50.0, 40.0)];

        align_rows(&[0, 1], &subgraphs, &mut positions, 50.0);

        assert_eq!(positions, [Point::new(0.0, 0.0), Point::new(50.0, 40.0)]);
    }

    #[test]
    fn test_stack_pipelines() {
        let subgraphs = sized(2, Size::new(100.0, 100.0));
        let layout = SolverLayout::new(
            HashMap::from([
                (subgraphs[0].0, Point::new(20.0, 25.0)),
                (subgraphs[1].0, Point::new(20.0, 175.0)),
            ]),
            Size::new(140.0, 300.0),
        );

        let positions = stack_pipelines(&subgraphs, &[], &layout, &SubgraphConfig::default());

        assert_eq!(positions, [Point::new(20.0, 25.0), Point::new(20.0, 175.0)]);
    }
}
