//! Sugiyama layout solver.
//!
//! Layer assignment and in-layer ordering come from the rust-sugiyama
//! implementation. Its coordinates are only used to rank and order nodes;
//! the final geometry is computed here from the real node sizes so that
//! nodes never overlap, whatever their dimensions.

use std::collections::{HashMap, HashSet};

use log::debug;
use rust_sugiyama::configure::Config;

use usegraph_core::geometry::{Point, Size};

use crate::layout::solver::{LayoutSolver, SolverError, SolverGraph, SolverLayout, SolverOptions};

/// Coordinates closer than this are treated as the same layer.
const LAYER_EPSILON: f64 = 1e-6;

/// Ordered layers of node indices, first layer leftmost.
type Layers = Vec<Vec<usize>>;

/// The Sugiyama layout solver.
///
/// Every weakly connected component is laid out as its own block of layers;
/// blocks are stacked top to bottom in the order the components are
/// reported, followed by isolated nodes in input order.
pub struct Engine {
    vertex_spacing: f64,
}

impl Engine {
    /// Create a new Sugiyama solver
    pub fn new() -> Self {
        Self {
            vertex_spacing: 3.0,
        }
    }

    /// Runs rust-sugiyama and converts each component into ordered layers.
    fn ranked_components(
        &self,
        edges: &[(u32, u32)],
        node_count: usize,
    ) -> Result<Vec<Layers>, SolverError> {
        debug!(
            "Applying Sugiyama algorithm to graph with {} nodes and {} edges",
            node_count,
            edges.len()
        );

        let config = Config {
            minimum_length: 1,
            vertex_spacing: self.vertex_spacing,
            ..Default::default()
        };
        let input = edges.to_vec();
        let results =
            std::panic::catch_unwind(move || rust_sugiyama::from_edges(&input, &config));

        match results {
            Ok(results) if results.is_empty() => Err(SolverError::EmptyResult),
            Ok(results) => results
                .iter()
                .map(|(coords, _, _)| layers(coords, edges, node_count))
                .collect(),
            Err(err) => {
                let message = if let Some(panic_msg) = err.downcast_ref::<String>() {
                    panic_msg.clone()
                } else if let Some(panic_msg) = err.downcast_ref::<&str>() {
                    (*panic_msg).to_string()
                } else {
                    "unknown error".to_string()
                };
                Err(SolverError::Panicked(message))
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutSolver for Engine {
    fn name(&self) -> &'static str {
        "sugiyama"
    }

    fn layout(
        &self,
        graph: &SolverGraph,
        options: &SolverOptions,
    ) -> Result<SolverLayout, SolverError> {
        let index: HashMap<_, _> = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id(), idx as u32))
            .collect();

        let mut edges = Vec::new();
        for &(source, target) in graph.edges() {
            let (Some(&source_idx), Some(&target_idx)) = (index.get(&source), index.get(&target))
            else {
                return Err(SolverError::Rejected(format!(
                    "edge `{source}` -> `{target}` leaves the graph"
                )));
            };
            // Skip self-loops and parallel edges
            if source_idx != target_idx && !edges.contains(&(source_idx, target_idx)) {
                edges.push((source_idx, target_idx));
            }
        }

        let mut components = if edges.is_empty() {
            Vec::new()
        } else {
            self.ranked_components(&edges, graph.nodes().len())?
        };

        let placed: HashSet<usize> = components.iter().flatten().flatten().copied().collect();
        components.extend(
            (0..graph.nodes().len())
                .filter(|idx| !placed.contains(idx))
                .map(|idx| vec![vec![idx]]),
        );

        let layout = place(graph, &components, options);
        layout.ensure_complete(graph)?;

        debug!(
            "Layout generated with {} components and size {:?}",
            components.len(),
            layout.size()
        );
        Ok(layout)
    }
}

/// Groups one component's coordinates into ordered layers.
///
/// Distinct `y` values are layers and `x` orders nodes inside a layer. The
/// layer sequence is flipped when most edges would otherwise point backwards.
fn layers(
    coords: &[(usize, (f64, f64))],
    edges: &[(u32, u32)],
    node_count: usize,
) -> Result<Layers, SolverError> {
    let mut placed: Vec<(usize, f64, f64)> = coords
        .iter()
        .filter_map(|&(id, (x, y))| {
            if id < node_count {
                Some((id, x, y))
            } else {
                debug!("Node ID {id} from rust-sugiyama result is out of valid range");
                None
            }
        })
        .collect();
    if placed.is_empty() {
        return Err(SolverError::EmptyResult);
    }

    let mut levels: Vec<f64> = placed.iter().map(|&(_, _, y)| y).collect();
    levels.sort_by(f64::total_cmp);
    levels.dedup_by(|a, b| (*a - *b).abs() < LAYER_EPSILON);

    let rank: HashMap<usize, usize> = placed
        .iter()
        .map(|&(id, _, y)| {
            let level = levels
                .iter()
                .position(|&level| (level - y).abs() < LAYER_EPSILON)
                .unwrap_or(0);
            (id, level)
        })
        .collect();

    let (forward, backward) = edges
        .iter()
        .filter_map(|&(source, target)| {
            Some((rank.get(&(source as usize))?, rank.get(&(target as usize))?))
        })
        .fold((0, 0), |(forward, backward), (source, target)| {
            match source.cmp(target) {
                std::cmp::Ordering::Less => (forward + 1, backward),
                std::cmp::Ordering::Greater => (forward, backward + 1),
                std::cmp::Ordering::Equal => (forward, backward),
            }
        });
    let flip = backward > forward;

    placed.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    let mut layers: Layers = vec![Vec::new(); levels.len()];
    for (id, _, _) in placed {
        let level = rank[&id];
        let level = if flip { levels.len() - 1 - level } else { level };
        layers[level].push(id);
    }
    Ok(layers)
}

/// Places components top to bottom, layers left to right.
///
/// Layers are as wide as their widest node and centred vertically within
/// the component; nodes are centred horizontally within their layer.
fn place(graph: &SolverGraph, components: &[Layers], options: &SolverOptions) -> SolverLayout {
    let nodes = graph.nodes();
    let padding = options.padding;

    let mut positions = HashMap::with_capacity(nodes.len());
    let mut cursor_y = padding.top();
    let mut content_width: f32 = 0.0;

    for (component_idx, component) in components.iter().enumerate() {
        if component_idx > 0 {
            cursor_y += options.node_spacing;
        }

        let layer_heights: Vec<f32> = component
            .iter()
            .map(|layer| {
                let heights: f32 = layer.iter().map(|&idx| nodes[idx].size().height()).sum();
                heights + options.node_spacing * layer.len().saturating_sub(1) as f32
            })
            .collect();
        let component_height = layer_heights.iter().copied().fold(0.0, f32::max);

        let mut x = padding.left();
        for (layer_idx, (layer, layer_height)) in component.iter().zip(&layer_heights).enumerate() {
            if layer_idx > 0 {
                x += options.layer_spacing;
            }
            let layer_width = layer
                .iter()
                .map(|&idx| nodes[idx].size().width())
                .fold(0.0, f32::max);

            let mut y = cursor_y + (component_height - layer_height) / 2.0;
            for &idx in layer {
                let size = nodes[idx].size();
                let node_x = x + (layer_width - size.width()) / 2.0;
                positions.insert(nodes[idx].id(), Point::new(node_x, y));
                y += size.height() + options.node_spacing;
            }
            x += layer_width;
        }

        content_width = content_width.max(x - padding.left());
        cursor_y += component_height;
    }

    let content = Size::new(content_width, cursor_y - padding.top());
    SolverLayout::new(positions, content.add_padding(padding))
}

#[cfg(test)]
mod tests {
    use usegraph_core::{geometry::Insets, identifier::Id};

    use super::*;

    fn options() -> SolverOptions {
        SolverOptions {
            padding: Insets::new(25.0, 15.0, 15.0, 20.0),
            node_spacing: 25.0,
            layer_spacing: 50.0,
        }
    }

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> SolverGraph {
        let mut graph = SolverGraph::new();
        for name in nodes {
            graph.add_node(Id::new(name), Size::new(100.0, 60.0));
        }
        for (source, target) in edges {
            graph.add_edge(Id::new(source), Id::new(target));
        }
        graph
    }

    #[test]
    fn test_layers_group_and_order() {
        let coords = [(0, (0.0, 0.0)), (2, (5.0, 1.0)), (1, (-5.0, 1.0))];
        let layers = layers(&coords, &[(0, 1), (0, 2)], 3).unwrap();
        assert_eq!(layers, vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_layers_flip_backward_levels() {
        let coords = [(0, (0.0, 0.0)), (1, (0.0, -1.0))];
        let layers = layers(&coords, &[(0, 1)], 2).unwrap();
        assert_eq!(layers, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_layers_ignore_out_of_range_ids() {
        let coords = [(0, (0.0, 0.0)), (7, (0.0, 1.0))];
        assert_eq!(layers(&coords, &[], 1).unwrap(), vec![vec![0]]);
        assert_eq!(layers(&[(7, (0.0, 0.0))], &[], 1), Err(SolverError::EmptyResult));
    }

    #[test]
    fn test_place_left_to_right() {
        let graph = graph(&["a", "b"], &[]);
        let layout = place(&graph, &[vec![vec![0], vec![1]]], &options());

        assert_eq!(layout.position(Id::new("a")), Some(Point::new(20.0, 25.0)));
        assert_eq!(layout.position(Id::new("b")), Some(Point::new(170.0, 25.0)));
        assert_eq!(layout.size(), Size::new(285.0, 100.0));
    }

    #[test]
    fn test_place_stacks_components() {
        let graph = graph(&["a", "b"], &[]);
        let layout = place(&graph, &[vec![vec![0]], vec![vec![1]]], &options());

        assert_eq!(layout.position(Id::new("b")), Some(Point::new(20.0, 110.0)));
        assert_eq!(layout.size(), Size::new(135.0, 185.0));
    }

    #[test]
    fn test_isolated_nodes_without_edges() {
        let graph = graph(&["a", "b", "c"], &[("a", "a")]);
        let layout = Engine::new().layout(&graph, &options()).unwrap();

        assert_eq!(layout.position(Id::new("a")), Some(Point::new(20.0, 25.0)));
        assert_eq!(layout.position(Id::new("c")), Some(Point::new(20.0, 195.0)));
    }

    #[test]
    fn test_rejects_foreign_edges() {
        let graph = graph(&["a"], &[("a", "elsewhere")]);
        assert!(matches!(
            Engine::new().layout(&graph, &options()),
            Err(SolverError::Rejected(_))
        ));
    }

    #[test]
    fn test_chain_is_laid_out_left_to_right() {
        let graph = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let layout = Engine::new().layout(&graph, &options()).unwrap();

        let x = |name| layout.position(Id::new(name)).map(Point::x).unwrap_or_default();
        assert!(x("a") < x("b"));
        assert!(x("b") < x("c"));
        assert_eq!(layout.size().height(), 100.0);
    }
}
