//! Typed graph model for audio use case diagrams.
//!
//! The model is a flat arena: every [`Node`] lives in one [`GraphView`]
//! array and refers to its parent by [`Id`](crate::identifier::Id), never by
//! a nested object graph. Containment is a four-level tree:
//!
//! ```text
//! Subsystem
//! └── Subgraph
//!     └── Container segment (containerId, subgraphId)
//!         └── Module
//! ```
//!
//! Subgraphs whose modules name no known subsystem are roots themselves.

mod edge;
mod node;
mod port;
mod view;

pub use edge::{Edge, EdgeKind};
pub use node::{ContainerData, ModuleData, Node, NodeData, NodeKind, SubgraphData, SubsystemData};
pub use port::{ControlPort, DataPort, Intent, PortClass, PortIoType, handle};
pub use view::{GraphView, Violation};
