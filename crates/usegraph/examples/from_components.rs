//! Example: Laying out a use case built in code
//!
//! This example demonstrates how to build a use case document directly from
//! the DTO types, without decoding JSON, and print the resulting layout.

use usegraph::{
    UsecaseDto, ViewBuilder,
    config::AppConfig,
    model::{Node, NodeKind},
};
use usegraph_dto::{DataPortDto, LinkDto, ModuleInstanceDto, PortIoTypeDto, SubsystemDto};

fn module(id: i64, name: &str, container_id: i64, subgraph_id: i64) -> ModuleInstanceDto {
    ModuleInstanceDto {
        id,
        name: Some(name.to_string()),
        alias: None,
        container_id,
        subgraph_id,
        parent_id: Some(100),
        system_id: None,
        data_ports: vec![
            DataPortDto {
                id: id * 10,
                name: Some("in".to_string()),
                port_io_type: PortIoTypeDto::Input,
                port_type: None,
                system_id: None,
            },
            DataPortDto {
                id: id * 10 + 1,
                name: Some("out".to_string()),
                port_io_type: PortIoTypeDto::Output,
                port_type: Some("Static".to_string()),
                system_id: None,
            },
        ],
        control_ports: Vec::new(),
    }
}

fn link(source: i64, destination: i64) -> LinkDto {
    LinkDto {
        id: None,
        source_id: source,
        source_port_id: source * 10 + 1,
        destination_id: destination,
        destination_port_id: destination * 10,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building use case from components...\n");

    // A capture path in subgraph 1 feeding a playback path in subgraph 2,
    // both owned by one subsystem
    let dto = UsecaseDto {
        module_instances: vec![
            module(1, "mic", 1, 1),
            module(2, "echo canceller", 1, 1),
            module(3, "encoder", 2, 1),
            module(4, "decoder", 3, 2),
            module(5, "speaker", 3, 2),
        ],
        subsystems: vec![SubsystemDto {
            id: 100,
            name: Some("voice".to_string()),
            parent_id: None,
            system_id: None,
            data_ports: Vec::new(),
            control_ports: Vec::new(),
        }],
        data_links: vec![link(1, 2), link(2, 3), link(3, 4), link(4, 5)],
        control_links: Vec::new(),
    };

    let builder = ViewBuilder::new(AppConfig::default());
    let run = builder.layout(&dto);
    builder.validate(&run)?;

    for node in run.view().nodes() {
        let indent = match node.kind() {
            NodeKind::Subsystem => 0,
            NodeKind::Subgraph => 2,
            NodeKind::Container => 4,
            NodeKind::Module => 6,
        };
        print_node(node, indent);
    }

    for degradation in run.degradations() {
        println!("degraded: {degradation}");
    }

    println!("\n{}", builder.export_json(&run)?);
    Ok(())
}

fn print_node(node: &Node, indent: usize) {
    let position = node.position();
    let size = node.size();
    println!(
        "{:indent$}{} `{}` at ({:.1}, {:.1}) size {:.1}x{:.1}",
        "",
        node.kind(),
        node.data().label(),
        position.x(),
        position.y(),
        size.width(),
        size.height(),
    );
}
