//! Usegraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the usegraph
//! workspace. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Model**: The typed node/edge graph and the [`model::GraphView`] arena
//! - **Engine selection**: [`LayoutEngine`] for choosing a layout solver

pub mod geometry;
pub mod identifier;
pub mod model;

mod engine;

pub use engine::LayoutEngine;
