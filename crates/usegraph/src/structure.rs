//! Graph construction from decoded use case documents.
//!
//! [`build`] turns a [`UsecaseDto`](usegraph_dto::UsecaseDto) into a flat
//! [`GraphView`](usegraph_core::model::GraphView) with explicit parent
//! references and no geometry. Node ids are derived from DTO ids, so
//! rebuilding the same document yields the same ids:
//!
//! | Node | Id |
//! |------|----|
//! | subsystem | `subsystem-<id>` |
//! | subgraph | `subgraph-<id>` |
//! | container segment | `container-<containerId>:<subgraphId>` |
//! | module | `module-<id>` |
//!
//! Edge ids have the form `e-<kind>-<source>-<target>-<index>`, where the
//! index counts links of the same kind across all merged documents.

mod builder;
mod lookup;

pub use builder::{build, container_id, module_id, subgraph_id, subsystem_id};
pub use lookup::{Endpoint, Lookups};
