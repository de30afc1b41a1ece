//! Typed use case documents.
//!
//! Field names follow the camelCase keys of the backend document. Only the
//! fields the graph needs are kept; everything else is ignored on decode.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Merged component collections of one or more use case documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsecaseDto {
    pub module_instances: Vec<ModuleInstanceDto>,
    pub subsystems: Vec<SubsystemDto>,
    pub data_links: Vec<LinkDto>,
    pub control_links: Vec<LinkDto>,
}

impl UsecaseDto {
    /// Appends every collection of `other` after the entries already present.
    pub fn merge(&mut self, other: UsecaseDto) {
        self.module_instances.extend(other.module_instances);
        self.subsystems.extend(other.subsystems);
        self.data_links.extend(other.data_links);
        self.control_links.extend(other.control_links);
    }

    pub fn is_empty(&self) -> bool {
        self.module_instances.is_empty()
            && self.subsystems.is_empty()
            && self.data_links.is_empty()
            && self.control_links.is_empty()
    }
}

/// A module instance placed in a container of a subgraph.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleInstanceDto {
    pub id: i64,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub container_id: i64,
    pub subgraph_id: i64,
    /// Owning subsystem, when the module belongs to one.
    pub parent_id: Option<i64>,
    pub system_id: Option<String>,
    pub data_ports: Vec<DataPortDto>,
    pub control_ports: Vec<ControlPortDto>,
}

/// A subsystem grouping subgraphs.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsystemDto {
    pub id: i64,
    pub name: Option<String>,
    pub parent_id: Option<i64>,
    pub system_id: Option<String>,
    pub data_ports: Vec<DataPortDto>,
    pub control_ports: Vec<ControlPortDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PortIoTypeDto {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPortDto {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub port_io_type: PortIoTypeDto,
    /// `Static` or `Dynamic`, copied to the output port as given.
    #[serde(default, deserialize_with = "loose_text")]
    pub port_type: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub system_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntentDto {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPortDto {
    pub id: i64,
    #[serde(default, rename = "controlPortName", alias = "name")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub intents: Vec<IntentDto>,
    #[serde(default, deserialize_with = "loose_text")]
    pub port_type: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub system_id: Option<String>,
}

/// A data or control link between two component ports.
///
/// Port ids name either a port's `id` or its `systemId`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub source_id: i64,
    pub source_port_id: i64,
    pub destination_id: i64,
    pub destination_port_id: i64,
}

/// Raw module shape. Port lists stay untyped so they can be coerced entry by entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawModule {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    pub container_id: i64,
    pub subgraph_id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default, deserialize_with = "loose_text")]
    pub system_id: Option<String>,
    #[serde(default)]
    pub data_ports: Option<Value>,
    #[serde(default)]
    pub control_ports: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSubsystem {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default, deserialize_with = "loose_text")]
    pub system_id: Option<String>,
    #[serde(default)]
    pub data_ports: Option<Value>,
    #[serde(default)]
    pub control_ports: Option<Value>,
}

/// Accepts `null` wherever a defaulted value is expected.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Free-form text fields such as `systemId` arrive as strings, occasionally
/// as numbers.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => Some(id),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}
