//! Immutable id lookups used to classify link endpoints and ports.
//!
//! Built once per run from the DTO and passed by reference; nothing here is
//! shared between runs.

use std::collections::{HashMap, HashSet};

use log::warn;

use usegraph_core::{identifier::Id, model::NodeKind};
use usegraph_dto::{ControlPortDto, DataPortDto, UsecaseDto};

/// What a raw link endpoint id resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Module(i64),
    Subsystem(i64),
    /// Matched nothing; treated as a module id.
    Unresolved(i64),
}

impl Endpoint {
    pub fn node_id(self) -> Id {
        match self {
            Endpoint::Module(raw) | Endpoint::Unresolved(raw) => {
                Id::scoped(NodeKind::Module.id_prefix(), raw)
            }
            Endpoint::Subsystem(raw) => Id::scoped(NodeKind::Subsystem.id_prefix(), raw),
        }
    }
}

/// Lookup sets for one pipeline run.
#[derive(Debug, Default)]
pub struct Lookups {
    modules: HashSet<i64>,
    subsystems: HashSet<i64>,
    data_ports: HashMap<String, i64>,
    control_ports: HashMap<String, i64>,
}

impl Lookups {
    pub fn from_dto(dto: &UsecaseDto) -> Self {
        let mut lookups = Self {
            modules: dto.module_instances.iter().map(|m| m.id).collect(),
            subsystems: dto.subsystems.iter().map(|s| s.id).collect(),
            ..Self::default()
        };

        let modules = dto
            .module_instances
            .iter()
            .map(|m| (&m.data_ports, &m.control_ports));
        let subsystems = dto.subsystems.iter().map(|s| (&s.data_ports, &s.control_ports));
        for (data_ports, control_ports) in modules.chain(subsystems) {
            lookups.add_data_ports(data_ports);
            lookups.add_control_ports(control_ports);
        }
        lookups
    }

    fn add_data_ports(&mut self, ports: &[DataPortDto]) {
        for port in ports {
            if let Some(system_id) = &port.system_id {
                self.data_ports.insert(system_id.clone(), port.id);
            }
        }
    }

    fn add_control_ports(&mut self, ports: &[ControlPortDto]) {
        for port in ports {
            if let Some(system_id) = &port.system_id {
                self.control_ports.insert(system_id.clone(), port.id);
            }
        }
    }

    pub fn is_subsystem(&self, raw: i64) -> bool {
        self.subsystems.contains(&raw)
    }

    /// Classifies a link endpoint: modules first, then subsystems.
    ///
    /// Unknown ids fall back to the module form and are logged.
    pub fn endpoint(&self, raw: i64) -> Endpoint {
        if self.modules.contains(&raw) {
            Endpoint::Module(raw)
        } else if self.subsystems.contains(&raw) {
            Endpoint::Subsystem(raw)
        } else {
            warn!(endpoint = raw; "Link endpoint matches no module or subsystem, treating it as a module");
            Endpoint::Unresolved(raw)
        }
    }

    /// Maps a link's data port reference to a port id.
    ///
    /// References matching a port `systemId` resolve to that port's id;
    /// anything else is used as a port id verbatim.
    pub fn data_port(&self, raw: i64) -> i64 {
        self.data_ports.get(&raw.to_string()).copied().unwrap_or(raw)
    }

    /// Control port counterpart of [`Lookups::data_port`].
    pub fn control_port(&self, raw: i64) -> i64 {
        self.control_ports.get(&raw.to_string()).copied().unwrap_or(raw)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn lookups() -> Lookups {
        let decoded = usegraph_dto::decode_value(&json!({
            "moduleInstances": [{
                "id": 1, "containerId": 1, "subgraphId": 1,
                "dataPorts": [{"id": 11, "portIoType": "Output", "systemId": "5011"}],
                "controlPorts": [{"id": 12, "controlPortName": "c", "systemId": "5012"}],
            }],
            "subsystems": [{"id": 7}],
        }));
        Lookups::from_dto(&decoded.dto)
    }

    #[test]
    fn test_endpoint_classification() {
        let lookups = lookups();
        assert_eq!(lookups.endpoint(1), Endpoint::Module(1));
        assert_eq!(lookups.endpoint(7), Endpoint::Subsystem(7));
        assert_eq!(lookups.endpoint(99), Endpoint::Unresolved(99));

        assert_eq!(Endpoint::Subsystem(7).node_id(), "subsystem-7");
        assert_eq!(Endpoint::Unresolved(99).node_id(), "module-99");
    }

    #[test]
    fn test_port_references() {
        let lookups = lookups();
        assert_eq!(lookups.data_port(5011), 11);
        assert_eq!(lookups.data_port(11), 11);
        assert_eq!(lookups.control_port(5012), 12);
        assert_eq!(lookups.control_port(5011), 5011);
    }
}
