//! Graph nodes and their kind-specific payloads.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    model::{ControlPort, DataPort},
};

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Subsystem,
    Subgraph,
    Container,
    Module,
}

impl NodeKind {
    /// Stacking hint for the renderer. Outer groups sit below inner ones.
    pub fn z_index(self) -> i32 {
        match self {
            NodeKind::Subsystem => -4,
            NodeKind::Subgraph => -3,
            NodeKind::Container => -2,
            NodeKind::Module => 0,
        }
    }

    /// Prefix used when deriving node identifiers.
    pub fn id_prefix(self) -> &'static str {
        match self {
            NodeKind::Subsystem => "subsystem",
            NodeKind::Subgraph => "subgraph",
            NodeKind::Container => "container",
            NodeKind::Module => "module",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id_prefix())
    }
}

/// Top-level grouping of subgraphs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsystemData {
    pub subsystem_id: i64,
    pub name: String,
    pub label: String,
}

/// Mid-level grouping of container segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubgraphData {
    pub subgraph_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsystem_id: Option<i64>,
    pub label: String,
}

/// Synthetic grouping of the modules sharing a container id within one subgraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerData {
    pub container_id: i64,
    pub subgraph_id: i64,
    pub label: String,
}

/// Leaf processing unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleData {
    pub module_id: i64,
    pub name: String,
    pub alias: String,
    pub container_id: i64,
    pub subgraph_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsystem_id: Option<i64>,
    pub data_ports: Vec<DataPort>,
    pub control_ports: Vec<ControlPort>,
    pub label: String,
    pub show_port_labels: bool,
}

/// Kind-specific payload of a [`Node`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    Subsystem(SubsystemData),
    Subgraph(SubgraphData),
    Container(ContainerData),
    Module(ModuleData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Subsystem(_) => NodeKind::Subsystem,
            NodeData::Subgraph(_) => NodeKind::Subgraph,
            NodeData::Container(_) => NodeKind::Container,
            NodeData::Module(_) => NodeKind::Module,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodeData::Subsystem(data) => &data.label,
            NodeData::Subgraph(data) => &data.label,
            NodeData::Container(data) => &data.label,
            NodeData::Module(data) => &data.label,
        }
    }
}

/// A positioned node of the graph view.
///
/// `position` is the top-left corner in the coordinate space of the parent
/// node, or absolute for root nodes. Nodes start at the origin with a zero
/// size; the layout phases fill both in.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    parent: Option<Id>,
    position: Point,
    size: Size,
    data: NodeData,
}

impl Node {
    pub fn new(id: Id, parent: Option<Id>, data: NodeData) -> Self {
        Self {
            id,
            parent,
            position: Point::default(),
            size: Size::default(),
            data,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Returns the module payload, if this node is a module.
    pub fn as_module(&self) -> Option<&ModuleData> {
        match &self.data {
            NodeData::Module(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the node's bounds in its parent's coordinate space.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        let mut state = serializer.serialize_struct("Node", 7)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("kind", &kind)?;
        match self.parent {
            Some(parent) => state.serialize_field("parentId", &parent)?,
            None => state.skip_field("parentId")?,
        }
        state.serialize_field("position", &self.position)?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("zIndex", &kind.z_index())?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container_node() -> Node {
        Node::new(
            Id::new("container-5:2"),
            Some(Id::new("subgraph-2")),
            NodeData::Container(ContainerData {
                container_id: 5,
                subgraph_id: 2,
                label: "Container 5".to_string(),
            }),
        )
    }

    #[test]
    fn test_new_node_is_unplaced() {
        let node = container_node();
        assert_eq!(node.position(), Point::default());
        assert_eq!(node.size(), Size::default());
        assert_eq!(node.kind(), NodeKind::Container);
        assert_eq!(node.data().label(), "Container 5");
        assert!(node.as_module().is_none());
    }

    #[test]
    fn test_bounds_follow_position_and_size() {
        let mut node = container_node();
        node.set_position(Point::new(25.0, 45.0));
        node.set_size(Size::new(237.5, 115.0));

        let bounds = node.bounds();
        assert_eq!(bounds.min_x(), 25.0);
        assert_eq!(bounds.max_x(), 262.5);
        assert_eq!(bounds.max_y(), 160.0);
    }

    #[test]
    fn test_z_index_orders_groups_below_modules() {
        assert!(NodeKind::Subsystem.z_index() < NodeKind::Subgraph.z_index());
        assert!(NodeKind::Subgraph.z_index() < NodeKind::Container.z_index());
        assert!(NodeKind::Container.z_index() < NodeKind::Module.z_index());
    }

    #[test]
    fn test_serialize_output_shape() {
        let mut node = container_node();
        node.set_size(Size::new(10.0, 20.0));

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["id"], "container-5:2");
        assert_eq!(json["kind"], "CONTAINER");
        assert_eq!(json["parentId"], "subgraph-2");
        assert_eq!(json["size"]["width"], 10.0);
        assert_eq!(json["zIndex"], -2);
        assert_eq!(json["data"]["containerId"], 5);
        assert_eq!(json["data"]["label"], "Container 5");
    }

    #[test]
    fn test_serialize_root_omits_parent() {
        let node = Node::new(
            Id::new("subsystem-1"),
            None,
            NodeData::Subsystem(SubsystemData {
                subsystem_id: 1,
                name: String::new(),
                label: "Subsystem 1".to_string(),
            }),
        );

        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("parentId").is_none());
        assert_eq!(json["kind"], "SUBSYSTEM");
    }
}
