//! Conversion of a [`UsecaseDto`] into the unpositioned node/edge graph.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use log::{debug, warn};

use usegraph_core::{
    identifier::Id,
    model::{
        ContainerData, ControlPort, DataPort, Edge, EdgeKind, GraphView, Intent, ModuleData, Node,
        NodeData, NodeKind, PortIoType, SubgraphData, SubsystemData, handle,
    },
};
use usegraph_dto::{LinkDto, ModuleInstanceDto, PortIoTypeDto, SubsystemDto, UsecaseDto};

use super::lookup::Lookups;

/// Identifier of the container segment `(container_id, subgraph_id)`.
pub fn container_id(container_id: i64, subgraph_id: i64) -> Id {
    Id::new(&format!(
        "{}-{container_id}:{subgraph_id}",
        NodeKind::Container.id_prefix()
    ))
}

pub fn subgraph_id(subgraph_id: i64) -> Id {
    Id::scoped(NodeKind::Subgraph.id_prefix(), subgraph_id)
}

pub fn subsystem_id(subsystem_id: i64) -> Id {
    Id::scoped(NodeKind::Subsystem.id_prefix(), subsystem_id)
}

pub fn module_id(module_id: i64) -> Id {
    Id::scoped(NodeKind::Module.id_prefix(), module_id)
}

/// Builds the unpositioned graph.
///
/// Nodes are emitted parents first: subsystems, subgraphs, container
/// segments, then modules. Every node starts at the origin with a zero size.
/// A repeated module or subsystem id keeps its first occurrence only.
pub fn build(dto: &UsecaseDto) -> GraphView {
    let lookups = Lookups::from_dto(dto);
    let mut view = GraphView::new();

    if dto.module_instances.is_empty() {
        warn!(subsystems = dto.subsystems.len(); "Use case has no module instances");
    }

    let subsystems = first_by_id(&dto.subsystems, |s| s.id, "subsystem");
    let modules = first_by_id(&dto.module_instances, |m| m.id, "module");

    push_subsystems(&subsystems, &mut view);
    push_subgraphs(&modules, &lookups, &mut view);
    push_containers(&modules, &mut view);
    push_modules(&modules, &mut view);

    push_links(&dto.data_links, EdgeKind::Data, &lookups, &mut view);
    push_links(&dto.control_links, EdgeKind::Control, &lookups, &mut view);

    debug!(
        nodes = view.nodes().len(),
        edges = view.edges().len();
        "Graph built"
    );
    view
}

/// Drops every entry whose id was already seen.
fn first_by_id<'a, T>(items: &'a [T], key: impl Fn(&T) -> i64, kind: &str) -> Vec<&'a T> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| {
            let id = key(*item);
            let first = seen.insert(id);
            if !first {
                warn!(kind, id; "Skipping repeated id, keeping the first occurrence");
            }
            first
        })
        .collect()
}

fn push_subsystems(subsystems: &[&SubsystemDto], view: &mut GraphView) {
    for subsystem in subsystems {
        let name = subsystem.name.clone().unwrap_or_default();
        let label = if name.is_empty() {
            format!("Subsystem {}", subsystem.id)
        } else {
            name.clone()
        };
        let data = NodeData::Subsystem(SubsystemData {
            subsystem_id: subsystem.id,
            name,
            label,
        });
        view.push_node(Node::new(subsystem_id(subsystem.id), None, data));
    }
}

fn push_subgraphs(modules: &[&ModuleInstanceDto], lookups: &Lookups, view: &mut GraphView) {
    let subgraphs: BTreeSet<i64> = modules.iter().map(|m| m.subgraph_id).collect();

    for subgraph in subgraphs {
        // First module naming a known subsystem decides the parent.
        let parent_subsystem = modules
            .iter()
            .filter(|m| m.subgraph_id == subgraph)
            .filter_map(|m| m.parent_id)
            .find(|&parent| lookups.is_subsystem(parent));

        let data = NodeData::Subgraph(SubgraphData {
            subgraph_id: subgraph,
            subsystem_id: parent_subsystem,
            label: format!("Subgraph {subgraph}"),
        });
        view.push_node(Node::new(
            subgraph_id(subgraph),
            parent_subsystem.map(subsystem_id),
            data,
        ));
    }
}

fn push_containers(modules: &[&ModuleInstanceDto], view: &mut GraphView) {
    let mut segments: IndexMap<Id, (i64, i64)> = IndexMap::new();
    for module in modules {
        segments
            .entry(container_id(module.container_id, module.subgraph_id))
            .or_insert((module.container_id, module.subgraph_id));
    }

    for (id, (container, subgraph)) in segments {
        let data = NodeData::Container(ContainerData {
            container_id: container,
            subgraph_id: subgraph,
            label: format!("Container {container}"),
        });
        view.push_node(Node::new(id, Some(subgraph_id(subgraph)), data));
    }
}

fn push_modules(modules: &[&ModuleInstanceDto], view: &mut GraphView) {
    for module in modules {
        let parent = container_id(module.container_id, module.subgraph_id);
        let data = NodeData::Module(module_data(module));
        view.push_node(Node::new(module_id(module.id), Some(parent), data));
    }
}

fn module_data(module: &ModuleInstanceDto) -> ModuleData {
    let name = module.name.clone().unwrap_or_default();
    let alias = module.alias.clone().unwrap_or_default();
    let label = [&alias, &name]
        .into_iter()
        .find(|text| !text.is_empty())
        .cloned()
        .unwrap_or_else(|| format!("Module {}", module.id));

    let data_ports = module
        .data_ports
        .iter()
        .map(|port| {
            let io = match port.port_io_type {
                PortIoTypeDto::Input => PortIoType::Input,
                PortIoTypeDto::Output => PortIoType::Output,
            };
            DataPort::new(port.id, port.name.clone().unwrap_or_default(), io)
                .with_port_type(port.port_type.clone())
        })
        .collect();
    let control_ports = module
        .control_ports
        .iter()
        .map(|port| {
            let intents = port
                .intents
                .iter()
                .map(|intent| Intent::new(intent.id, intent.name.clone().unwrap_or_default()))
                .collect();
            ControlPort::new(port.id, port.name.clone().unwrap_or_default(), intents)
                .with_port_type(port.port_type.clone())
        })
        .collect();

    ModuleData {
        module_id: module.id,
        name,
        alias,
        container_id: module.container_id,
        subgraph_id: module.subgraph_id,
        subsystem_id: module.parent_id,
        data_ports,
        control_ports,
        label,
        show_port_labels: false,
    }
}

fn push_links(links: &[LinkDto], kind: EdgeKind, lookups: &Lookups, view: &mut GraphView) {
    for (idx, link) in links.iter().enumerate() {
        let source = lookups.endpoint(link.source_id).node_id();
        let target = lookups.endpoint(link.destination_id).node_id();

        let (source_handle, target_handle) = match kind {
            EdgeKind::Data => (
                handle::data(lookups.data_port(link.source_port_id)),
                handle::data(lookups.data_port(link.destination_port_id)),
            ),
            EdgeKind::Control => (
                handle::control_source(lookups.control_port(link.source_port_id)),
                handle::control_target(lookups.control_port(link.destination_port_id)),
            ),
        };

        let id = Id::new(&format!("e-{}-{source}-{target}-{idx}", kind.as_str()));
        view.push_edge(Edge::new(
            id,
            kind,
            (source, source_handle),
            (target, target_handle),
        ));
    }
}
