//! Data-quality checks over a decoded [`UsecaseDto`].
//!
//! None of these findings stop the graph from being built; they point at
//! upstream inconsistencies that make the result order-dependent or leave
//! edges pointing at placeholder nodes. Paths index the merged collections.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
    dto::{LinkDto, UsecaseDto},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
};

/// Runs every data-quality check and returns the findings.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use usegraph_dto::{ErrorCode, decode_value, validate};
///
/// let decoded = decode_value(&json!({
///     "moduleInstances": [
///         {"id": 1, "containerId": 1, "subgraphId": 1},
///         {"id": 1, "containerId": 1, "subgraphId": 1},
///     ],
/// }));
/// let findings = validate(&decoded.dto);
/// assert_eq!(findings[0].code(), Some(ErrorCode::W201));
/// ```
pub fn validate(dto: &UsecaseDto) -> Vec<Diagnostic> {
    let mut collector = DiagnosticCollector::new();
    let subsystem_ids: HashSet<i64> = dto.subsystems.iter().map(|s| s.id).collect();

    check_modules(dto, &subsystem_ids, &mut collector);
    check_subgraph_subsystems(dto, &subsystem_ids, &mut collector);
    check_links(dto, &subsystem_ids, &mut collector);

    collector.finish()
}

fn check_modules(
    dto: &UsecaseDto,
    subsystem_ids: &HashSet<i64>,
    collector: &mut DiagnosticCollector,
) {
    let mut seen = HashSet::new();
    for (idx, module) in dto.module_instances.iter().enumerate() {
        let path = format!("/moduleInstances/{idx}");
        if !seen.insert(module.id) {
            collector.emit(
                Diagnostic::warning(format!("duplicate module id {}", module.id))
                    .with_code(ErrorCode::W201)
                    .with_path(path.clone())
                    .with_help("both modules map to the same node id"),
            );
        }
        if let Some(parent) = module.parent_id.filter(|id| !subsystem_ids.contains(id)) {
            collector.emit(
                Diagnostic::warning(format!(
                    "module {} names unknown subsystem {parent}",
                    module.id
                ))
                .with_code(ErrorCode::W202)
                .with_path(path),
            );
        }
    }
}

/// Modules of one subgraph should agree on their subsystem.
fn check_subgraph_subsystems(
    dto: &UsecaseDto,
    subsystem_ids: &HashSet<i64>,
    collector: &mut DiagnosticCollector,
) {
    let mut claims: IndexMap<i64, Vec<i64>> = IndexMap::new();
    for module in &dto.module_instances {
        let entry = claims.entry(module.subgraph_id).or_default();
        if let Some(parent) = module.parent_id.filter(|id| subsystem_ids.contains(id)) {
            if !entry.contains(&parent) {
                entry.push(parent);
            }
        }
    }

    for (subgraph, subsystems) in claims {
        if let [winner, _, ..] = subsystems.as_slice() {
            let names: Vec<String> = subsystems.iter().map(i64::to_string).collect();
            collector.emit(
                Diagnostic::warning(format!(
                    "modules of subgraph {subgraph} disagree on their subsystem ({})",
                    names.join(", ")
                ))
                .with_code(ErrorCode::W200)
                .with_help(format!("subgraph {subgraph} is placed in subsystem {winner}")),
            );
        }
    }
}

fn check_links(
    dto: &UsecaseDto,
    subsystem_ids: &HashSet<i64>,
    collector: &mut DiagnosticCollector,
) {
    let module_ids: HashSet<i64> = dto.module_instances.iter().map(|m| m.id).collect();

    let mut data_ports = PortRefs::default();
    let mut control_ports = PortRefs::default();
    for module in &dto.module_instances {
        data_ports.extend(module.data_ports.iter().map(|p| (p.id, p.system_id.as_deref())));
        control_ports.extend(module.control_ports.iter().map(|p| (p.id, p.system_id.as_deref())));
    }
    for subsystem in &dto.subsystems {
        data_ports.extend(subsystem.data_ports.iter().map(|p| (p.id, p.system_id.as_deref())));
        control_ports.extend(
            subsystem
                .control_ports
                .iter()
                .map(|p| (p.id, p.system_id.as_deref())),
        );
    }

    let known = |id: i64| module_ids.contains(&id) || subsystem_ids.contains(&id);
    let groups = [
        ("dataLinks", "data", &dto.data_links, &data_ports),
        ("controlLinks", "control", &dto.control_links, &control_ports),
    ];
    for (key, kind, links, ports) in groups {
        for (idx, link) in links.iter().enumerate() {
            let path = format!("/{key}/{idx}");
            let label = link_label(kind, link);
            for (role, id) in [("source", link.source_id), ("destination", link.destination_id)] {
                if !known(id) {
                    collector.emit(
                        Diagnostic::warning(format!("{label} references unknown {role} {id}"))
                            .with_code(ErrorCode::W203)
                            .with_path(path.clone())
                            .with_help(format!("the edge is kept and targets `module-{id}`")),
                    );
                }
            }
            for (role, port) in [
                ("source", link.source_port_id),
                ("destination", link.destination_port_id),
            ] {
                if !ports.contains(port) {
                    collector.emit(
                        Diagnostic::warning(format!("{label} references unknown {role} port {port}"))
                            .with_code(ErrorCode::W204)
                            .with_path(path.clone()),
                    );
                }
            }
        }
    }
}

fn link_label(kind: &str, link: &LinkDto) -> String {
    match link.id {
        Some(id) => format!("{kind} link {id}"),
        None => format!("{kind} link"),
    }
}

/// Port ids and system ids of one port class.
#[derive(Default)]
struct PortRefs {
    ids: HashSet<i64>,
    system_ids: HashSet<String>,
}

impl PortRefs {
    fn extend<'a>(&mut self, ports: impl Iterator<Item = (i64, Option<&'a str>)>) {
        for (id, system_id) in ports {
            self.ids.insert(id);
            if let Some(system_id) = system_id {
                self.system_ids.insert(system_id.to_string());
            }
        }
    }

    fn contains(&self, port: i64) -> bool {
        self.ids.contains(&port) || self.system_ids.contains(&port.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decode_value;

    fn codes(findings: &[Diagnostic]) -> Vec<ErrorCode> {
        findings.iter().filter_map(Diagnostic::code).collect()
    }

    #[test]
    fn test_consistent_document_has_no_findings() {
        let decoded = decode_value(&json!({
            "subsystems": [{"id": 5}],
            "moduleInstances": [
                {"id": 1, "containerId": 1, "subgraphId": 1, "parentId": 5,
                 "dataPorts": [{"id": 10, "portIoType": "Output", "systemId": "p-10"}]},
                {"id": 2, "containerId": 1, "subgraphId": 1, "parentId": 5,
                 "dataPorts": [{"id": 20, "portIoType": "Input"}]},
            ],
            "dataLinks": [{"id": 1, "sourceId": 1, "sourcePortId": 10, "destinationId": 2, "destinationPortId": 20}],
        }));

        assert!(validate(&decoded.dto).is_empty());
    }

    #[test]
    fn test_subgraph_subsystem_disagreement() {
        let decoded = decode_value(&json!({
            "subsystems": [{"id": 5}, {"id": 6}],
            "moduleInstances": [
                {"id": 1, "containerId": 1, "subgraphId": 3, "parentId": 6},
                {"id": 2, "containerId": 1, "subgraphId": 3},
                {"id": 3, "containerId": 2, "subgraphId": 3, "parentId": 5},
            ],
        }));

        let findings = validate(&decoded.dto);
        assert_eq!(codes(&findings), [ErrorCode::W200]);
        assert_eq!(findings[0].help(), Some("subgraph 3 is placed in subsystem 6"));
    }

    #[test]
    fn test_unknown_parent_subsystem() {
        let decoded = decode_value(&json!({
            "moduleInstances": [{"id": 1, "containerId": 1, "subgraphId": 1, "parentId": 77}],
        }));

        assert_eq!(codes(&validate(&decoded.dto)), [ErrorCode::W202]);
    }

    #[test]
    fn test_unresolved_link_endpoint_and_port() {
        let decoded = decode_value(&json!({
            "moduleInstances": [{"id": 1, "containerId": 1, "subgraphId": 1,
                "controlPorts": [{"id": 4, "controlPortName": "c", "systemId": "900"}]}],
            "controlLinks": [{"sourceId": 1, "sourcePortId": 900, "destinationId": 99, "destinationPortId": 5}],
        }));

        let findings = validate(&decoded.dto);
        assert_eq!(codes(&findings), [ErrorCode::W203, ErrorCode::W204]);
        assert_eq!(
            findings[0].message(),
            "control link references unknown destination 99"
        );
        assert_eq!(findings[1].path(), Some("/controlLinks/0"));
    }
}
