//! Tolerant coercion of untrusted JSON into a [`UsecaseDto`].
//!
//! The input is either one document object or an array of document objects
//! whose collections are concatenated in order. Coercion never fails:
//!
//! - a root that is not an object (or an array element that is not) adds
//!   nothing and is reported as `E001`
//! - a collection that is present but not an array is treated as empty and
//!   reported as `E002`
//! - an entry that does not match its expected shape is skipped (`W100`)
//! - port lists follow the same rules with `W101` and `W102`
//!
//! Missing collections are simply empty.

use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    dto::{
        ControlPortDto, DataPortDto, LinkDto, ModuleInstanceDto, RawModule, RawSubsystem,
        SubsystemDto, UsecaseDto,
    },
    error::{DecodeError, Diagnostic, DiagnosticCollector, ErrorCode},
};

/// A decoded document together with everything that had to be coerced.
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    pub dto: UsecaseDto,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses JSON text and coerces it into a [`UsecaseDto`].
///
/// # Errors
///
/// Returns [`DecodeError`] only when `text` is not valid JSON.
pub fn decode_str(text: &str) -> Result<Decoded, DecodeError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(decode_value(&value))
}

/// Coerces an already parsed JSON value into a [`UsecaseDto`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use usegraph_dto::{ErrorCode, decode_value};
///
/// let decoded = decode_value(&json!({"moduleInstances": "not-an-array"}));
/// assert!(decoded.dto.module_instances.is_empty());
/// assert_eq!(decoded.diagnostics[0].code(), Some(ErrorCode::E002));
/// ```
pub fn decode_value(value: &Value) -> Decoded {
    let mut collector = DiagnosticCollector::new();
    let mut dto = UsecaseDto::default();

    match value {
        Value::Object(document) => dto.merge(decode_document(document, "", &mut collector)),
        Value::Array(documents) if documents.is_empty() => collector.emit(
            Diagnostic::error("document array is empty")
                .with_code(ErrorCode::E001)
                .with_path("/"),
        ),
        Value::Array(documents) => {
            for (idx, document) in documents.iter().enumerate() {
                let path = format!("/{idx}");
                match document {
                    Value::Object(document) => {
                        dto.merge(decode_document(document, &path, &mut collector))
                    }
                    other => collector.emit(not_an_object(other, path)),
                }
            }
        }
        other => collector.emit(not_an_object(other, "/".to_string())),
    }

    debug!(
        modules = dto.module_instances.len(),
        subsystems = dto.subsystems.len(),
        data_links = dto.data_links.len(),
        control_links = dto.control_links.len();
        "Decoded use case document"
    );

    Decoded {
        dto,
        diagnostics: collector.finish(),
    }
}

fn not_an_object(value: &Value, path: String) -> Diagnostic {
    Diagnostic::error(format!("expected a document object, found {}", kind_of(value)))
        .with_code(ErrorCode::E001)
        .with_path(path)
        .with_help("the value is ignored")
}

fn decode_document(
    document: &Map<String, Value>,
    base: &str,
    collector: &mut DiagnosticCollector,
) -> UsecaseDto {
    let module_instances = collection(document, "moduleInstances", base, collector, |v, p, c| {
        RawModule::deserialize(v)
            .map(|raw| module_from_raw(raw, p, c))
            .map_err(|err| err.to_string())
    });
    let subsystems = collection(document, "subsystems", base, collector, |v, p, c| {
        RawSubsystem::deserialize(v)
            .map(|raw| subsystem_from_raw(raw, p, c))
            .map_err(|err| err.to_string())
    });
    let data_links = collection(document, "dataLinks", base, collector, |v, _, _| {
        LinkDto::deserialize(v).map_err(|err| err.to_string())
    });
    let control_links = collection(document, "controlLinks", base, collector, |v, _, _| {
        LinkDto::deserialize(v).map_err(|err| err.to_string())
    });

    UsecaseDto {
        module_instances,
        subsystems,
        data_links,
        control_links,
    }
}

/// Decodes `document[key]` entry by entry.
fn collection<T>(
    document: &Map<String, Value>,
    key: &str,
    base: &str,
    collector: &mut DiagnosticCollector,
    decode: impl Fn(&Value, &str, &mut DiagnosticCollector) -> Result<T, String>,
) -> Vec<T> {
    let path = format!("{base}/{key}");
    let Some(value) = document.get(key) else {
        return Vec::new();
    };
    let Value::Array(entries) = value else {
        collector.emit(
            Diagnostic::error(format!("`{key}` is not a list, found {}", kind_of(value)))
                .with_code(ErrorCode::E002)
                .with_path(path)
                .with_help("treated as an empty list"),
        );
        return Vec::new();
    };

    let mut items = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let entry_path = format!("{path}/{idx}");
        match decode(entry, &entry_path, collector) {
            Ok(item) => items.push(item),
            Err(reason) => collector.emit(
                Diagnostic::warning(format!("skipped malformed `{key}` entry"))
                    .with_code(ErrorCode::W100)
                    .with_path(entry_path)
                    .with_help(reason),
            ),
        }
    }
    items
}

/// Decodes an optional port list, skipping malformed ports.
fn ports<T>(value: Option<Value>, path: &str, collector: &mut DiagnosticCollector) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
{
    let entries = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            collector.emit(
                Diagnostic::warning(format!("port list is not a list, found {}", kind_of(&other)))
                    .with_code(ErrorCode::W101)
                    .with_path(path)
                    .with_help("treated as an empty list"),
            );
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| match T::deserialize(entry) {
            Ok(port) => Some(port),
            Err(err) => {
                collector.emit(
                    Diagnostic::warning("skipped malformed port")
                        .with_code(ErrorCode::W102)
                        .with_path(format!("{path}/{idx}"))
                        .with_help(err.to_string()),
                );
                None
            }
        })
        .collect()
}

fn module_from_raw(
    raw: RawModule,
    path: &str,
    collector: &mut DiagnosticCollector,
) -> ModuleInstanceDto {
    ModuleInstanceDto {
        id: raw.id,
        name: raw.name,
        alias: raw.alias,
        container_id: raw.container_id,
        subgraph_id: raw.subgraph_id,
        parent_id: raw.parent_id,
        system_id: raw.system_id,
        data_ports: ports::<DataPortDto>(raw.data_ports, &format!("{path}/dataPorts"), collector),
        control_ports: ports::<ControlPortDto>(
            raw.control_ports,
            &format!("{path}/controlPorts"),
            collector,
        ),
    }
}

fn subsystem_from_raw(
    raw: RawSubsystem,
    path: &str,
    collector: &mut DiagnosticCollector,
) -> SubsystemDto {
    SubsystemDto {
        id: raw.id,
        name: raw.name,
        parent_id: raw.parent_id,
        system_id: raw.system_id,
        data_ports: ports::<DataPortDto>(raw.data_ports, &format!("{path}/dataPorts"), collector),
        control_ports: ports::<ControlPortDto>(
            raw.control_ports,
            &format!("{path}/controlPorts"),
            collector,
        ),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn codes(decoded: &Decoded) -> Vec<ErrorCode> {
        decoded
            .diagnostics
            .iter()
            .filter_map(Diagnostic::code)
            .collect()
    }

    fn module(id: i64, container: i64, subgraph: i64) -> Value {
        json!({
            "id": id,
            "name": format!("m{id}"),
            "alias": "",
            "containerId": container,
            "subgraphId": subgraph,
            "dataPorts": [{"id": id * 10, "name": "out", "portIoType": "Output"}],
            "controlPorts": [],
        })
    }

    #[test]
    fn test_well_formed_document() {
        let decoded = decode_value(&json!({
            "usecaseId": 42,
            "moduleInstances": [module(1, 1, 1), module(2, 1, 1)],
            "subsystems": [{"id": 9, "name": "dsp"}],
            "dataLinks": [{"id": 1, "sourceId": 1, "sourcePortId": 10, "destinationId": 2, "destinationPortId": 20}],
            "controlLinks": [],
        }));

        assert!(decoded.diagnostics.is_empty());
        assert_eq!(decoded.dto.module_instances.len(), 2);
        assert_eq!(decoded.dto.module_instances[0].data_ports[0].id, 10);
        assert_eq!(decoded.dto.subsystems[0].name.as_deref(), Some("dsp"));
        assert_eq!(decoded.dto.data_links.len(), 1);
    }

    #[test]
    fn test_root_not_an_object() {
        for value in [json!(null), json!("text"), json!(3), json!([])] {
            let decoded = decode_value(&value);
            assert!(decoded.dto.is_empty());
            assert_eq!(codes(&decoded), [ErrorCode::E001]);
            assert!(decoded.diagnostics[0].severity().is_error());
        }
    }

    #[test]
    fn test_collection_not_a_list() {
        let decoded = decode_value(&json!({
            "moduleInstances": "not-an-array",
            "dataLinks": {"id": 1},
        }));

        assert!(decoded.dto.is_empty());
        assert_eq!(codes(&decoded), [ErrorCode::E002, ErrorCode::E002]);
        assert_eq!(decoded.diagnostics[0].path(), Some("/moduleInstances"));
    }

    #[test]
    fn test_missing_collections_are_silent() {
        let decoded = decode_value(&json!({}));
        assert!(decoded.dto.is_empty());
        assert!(decoded.diagnostics.is_empty());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let decoded = decode_value(&json!({
            "moduleInstances": [module(1, 1, 1), 5, {"id": 2, "containerId": 1}],
        }));

        assert_eq!(decoded.dto.module_instances.len(), 1);
        assert_eq!(codes(&decoded), [ErrorCode::W100, ErrorCode::W100]);
        assert_eq!(decoded.diagnostics[1].path(), Some("/moduleInstances/2"));
    }

    #[test]
    fn test_port_lists_are_coerced() {
        let decoded = decode_value(&json!({
            "moduleInstances": [{
                "id": 1, "containerId": 1, "subgraphId": 1,
                "dataPorts": "none",
                "controlPorts": [{"id": 3, "controlPortName": "c"}, {"name": "no id"}],
            }],
        }));

        let module = &decoded.dto.module_instances[0];
        assert!(module.data_ports.is_empty());
        assert_eq!(module.control_ports.len(), 1);
        assert_eq!(codes(&decoded), [ErrorCode::W101, ErrorCode::W102]);
        assert_eq!(
            decoded.diagnostics[1].path(),
            Some("/moduleInstances/0/controlPorts/1")
        );
    }

    #[test]
    fn test_document_array_is_merged() {
        let decoded = decode_value(&json!([
            {"moduleInstances": [module(1, 1, 1)]},
            "junk",
            {"moduleInstances": [module(2, 3, 2)], "subsystems": [{"id": 4}]},
        ]));

        let ids: Vec<_> = decoded.dto.module_instances.iter().map(|m| m.id).collect();
        assert_eq!(ids, [1, 2]);
        assert_eq!(decoded.dto.subsystems.len(), 1);
        assert_eq!(codes(&decoded), [ErrorCode::E001]);
        assert_eq!(decoded.diagnostics[0].path(), Some("/1"));
    }

    #[test]
    fn test_decode_str_rejects_invalid_json() {
        assert!(decode_str("{ not json").is_err());
        let decoded = decode_str(r#"{"moduleInstances": []}"#).unwrap();
        assert!(decoded.dto.is_empty());
    }
}
