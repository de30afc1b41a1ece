//! Configuration types for use case graph layout.
//!
//! This module provides configuration structures that control how the layout
//! pipeline sizes and spaces nodes. All types implement
//! [`serde::Deserialize`] for loading from external sources, and every field
//! is optional: missing values fall back to the defaults documented on each
//! section.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`LayoutConfig`] - Layout engine selection and per-phase settings.
//! - [`ContainerConfig`] - Module placement inside container segments.
//! - [`PackingConfig`] - Shelf packing of container segments into subgraphs.
//! - [`SubgraphConfig`] - Placement of subgraphs relative to each other.
//! - [`SubsystemConfig`] - Subsystem bounding boxes.
//!
//! # Example
//!
//! ```
//! # use usegraph::config::AppConfig;
//! # use usegraph_core::LayoutEngine;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().engine(), LayoutEngine::Sugiyama);
//! assert_eq!(config.layout().module_size().width(), 100.0);
//! ```

use serde::Deserialize;

use usegraph_core::{
    LayoutEngine,
    geometry::{Insets, Point, Size},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout configuration.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Layout engine selection and the settings of every layout phase.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// [`LayoutEngine`] used for both solver-backed phases.
    engine: LayoutEngine,

    /// Fixed size of every module node.
    module_size: Size,

    /// Slack allowed when checking that children fit inside their parents.
    epsilon: f32,

    container: ContainerConfig,
    packing: PackingConfig,
    subgraphs: SubgraphConfig,
    subsystem: SubsystemConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            module_size: Size::new(100.0, 60.0),
            epsilon: 0.5,
            container: ContainerConfig::default(),
            packing: PackingConfig::default(),
            subgraphs: SubgraphConfig::default(),
            subsystem: SubsystemConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Returns a copy of this configuration using `engine`.
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn module_size(&self) -> Size {
        self.module_size
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn container(&self) -> &ContainerConfig {
        &self.container
    }

    pub fn packing(&self) -> &PackingConfig {
        &self.packing
    }

    pub fn subgraphs(&self) -> &SubgraphConfig {
        &self.subgraphs
    }

    pub fn subsystem(&self) -> &SubsystemConfig {
        &self.subsystem
    }
}

/// Module placement inside a container segment.
///
/// The segment size is the solver's bounding size grown by `size_inset`.
/// When the solver fails, modules are placed in one row starting at
/// `fallback_origin` with a pitch of module width plus `node_spacing`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    padding: Insets,
    node_spacing: f32,
    layer_spacing: f32,
    size_inset: Size,
    fallback_origin: Point,
    fallback_bottom: f32,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            padding: Insets::new(25.0, 15.0, 15.0, 20.0),
            node_spacing: 25.0,
            layer_spacing: 50.0,
            size_inset: Size::new(12.5, 15.0),
            fallback_origin: Point::new(15.0, 40.0),
            fallback_bottom: 20.0,
        }
    }
}

impl ContainerConfig {
    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    pub fn layer_spacing(&self) -> f32 {
        self.layer_spacing
    }

    pub fn size_inset(&self) -> Size {
        self.size_inset
    }

    pub fn fallback_origin(&self) -> Point {
        self.fallback_origin
    }

    pub fn fallback_bottom(&self) -> f32 {
        self.fallback_bottom
    }
}

/// Shelf packing of container segments inside a subgraph.
///
/// Containers start at `padding` horizontally and `padding + header`
/// vertically and are separated by `gap`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    padding: f32,
    header: f32,
    gap: f32,
    right_margin: f32,
    bottom_margin: f32,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            padding: 25.0,
            header: 20.0,
            gap: 10.0,
            right_margin: 5.0,
            bottom_margin: 35.0,
        }
    }
}

impl PackingConfig {
    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn header(&self) -> f32 {
        self.header
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn right_margin(&self) -> f32 {
        self.right_margin
    }

    pub fn bottom_margin(&self) -> f32 {
        self.bottom_margin
    }
}

/// Placement of subgraphs relative to each other.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubgraphConfig {
    padding: Insets,
    node_spacing: f32,
    layer_spacing: f32,
    /// Vertical gap between stacked pipelines.
    pipeline_gap: f32,
    /// Subgraphs of one pipeline whose `y` differ by at most this much share a row.
    row_tolerance: f32,
    fallback_origin: Point,
    fallback_pitch: f32,
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self {
            padding: Insets::new(25.0, 20.0, 25.0, 20.0),
            node_spacing: 50.0,
            layer_spacing: 40.0,
            pipeline_gap: 0.0,
            row_tolerance: 50.0,
            fallback_origin: Point::new(50.0, 50.0),
            fallback_pitch: 850.0,
        }
    }
}

impl SubgraphConfig {
    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    pub fn layer_spacing(&self) -> f32 {
        self.layer_spacing
    }

    pub fn pipeline_gap(&self) -> f32 {
        self.pipeline_gap
    }

    pub fn row_tolerance(&self) -> f32 {
        self.row_tolerance
    }

    pub fn fallback_origin(&self) -> Point {
        self.fallback_origin
    }

    pub fn fallback_pitch(&self) -> f32 {
        self.fallback_pitch
    }
}

/// Subsystem bounding boxes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubsystemConfig {
    margin: f32,
    /// Size given to subsystems without child subgraphs.
    empty_size: Size,
}

impl Default for SubsystemConfig {
    fn default() -> Self {
        Self {
            margin: 50.0,
            empty_size: Size::new(100.0, 100.0),
        }
    }
}

impl SubsystemConfig {
    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn empty_size(&self) -> Size {
        self.empty_size
    }
}
