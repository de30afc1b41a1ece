use proptest::prelude::*;
use serde_json::{Map, Value, json};

use usegraph_dto::{ErrorCode, decode_value, validate};

const KEYS: &[&str] = &[
    "moduleInstances",
    "subsystems",
    "dataLinks",
    "controlLinks",
    "id",
    "containerId",
    "subgraphId",
    "parentId",
    "systemId",
    "dataPorts",
    "controlPorts",
    "portIoType",
    "sourceId",
    "destinationId",
];

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-5i64..5).prop_map(|n| json!(n)),
        "[a-z]{0,4}".prop_map(Value::String),
        Just(json!("Input")),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((prop::sample::select(KEYS), inner), 0..6).prop_map(
                |entries| {
                    let map: Map<String, Value> = entries
                        .into_iter()
                        .map(|(key, value)| (key.to_string(), value))
                        .collect();
                    Value::Object(map)
                }
            ),
        ]
    })
}

fn module(id: i64, container: i64, subgraph: i64) -> Value {
    json!({
        "id": id,
        "name": format!("m{id}"),
        "containerId": container,
        "subgraphId": subgraph,
        "dataPorts": [
            {"id": id * 10, "name": "in", "portIoType": "Input"},
            {"id": id * 10 + 1, "name": "out", "portIoType": "Output"},
        ],
        "controlPorts": [],
    })
}

fn arb_document() -> impl Strategy<Value = (usize, Value)> {
    prop::collection::vec((0i64..3, 0i64..3), 1..12).prop_map(|placements| {
        let modules: Vec<Value> = placements
            .iter()
            .enumerate()
            .map(|(idx, (container, subgraph))| module(idx as i64 + 1, *container, *subgraph))
            .collect();
        let links: Vec<Value> = (1..placements.len() as i64)
            .map(|id| {
                json!({
                    "id": id,
                    "sourceId": id,
                    "sourcePortId": id * 10 + 1,
                    "destinationId": id + 1,
                    "destinationPortId": (id + 1) * 10,
                })
            })
            .collect();
        let document = json!({
            "moduleInstances": modules,
            "subsystems": [],
            "dataLinks": links,
            "controlLinks": [],
        });
        (placements.len(), document)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn decode_arbitrary_json_never_panics(value in arb_json()) {
        let decoded = decode_value(&value);
        for diagnostic in &decoded.diagnostics {
            prop_assert!(diagnostic.code().is_some());
        }
        let _ = validate(&decoded.dto);
    }

    #[test]
    fn well_formed_documents_decode_cleanly((count, document) in arb_document()) {
        let decoded = decode_value(&document);
        prop_assert!(decoded.diagnostics.is_empty(), "{:?}", decoded.diagnostics);
        prop_assert_eq!(decoded.dto.module_instances.len(), count);
        prop_assert_eq!(decoded.dto.data_links.len(), count - 1);

        let findings = validate(&decoded.dto);
        prop_assert!(findings.iter().all(|d| d.code() != Some(ErrorCode::W201)));
        prop_assert!(findings.iter().all(|d| d.code() != Some(ErrorCode::W203)));
    }

    #[test]
    fn document_arrays_merge_in_order((count, document) in arb_document()) {
        let single = decode_value(&document);
        let merged = decode_value(&Value::Array(vec![document.clone(), json!({})]));

        prop_assert_eq!(merged.dto.module_instances.len(), count);
        let ids: Vec<i64> = merged.dto.module_instances.iter().map(|m| m.id).collect();
        let expected: Vec<i64> = single.dto.module_instances.iter().map(|m| m.id).collect();
        prop_assert_eq!(ids, expected);
    }
}
