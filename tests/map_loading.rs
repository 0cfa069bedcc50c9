mod util;

use lanelet_roundabout::prelude::*;
use lanelet_roundabout::regulatory::registry::UnknownRulePolicy;
use util::{host_map, lanelet, line, poly};

// Records as a host loader would hand them over after decoding.
const RECORDS: &str = r#"[
    {
        "id": 100,
        "attributes": { "type": "regulatory_element", "subtype": "roundabout" },
        "parameters": {
            "refers": [ { "lanelet": 1 } ],
            "roundabout_polygon": [ { "polygon": 20 }, { "polygon": 21 } ],
            "ref_line": [ { "line_string": 12 } ]
        }
    },
    {
        "id": 101,
        "attributes": { "type": "regulatory_element", "subtype": "speed_bump" },
        "parameters": {
            "refers": [ { "polygon": 22 } ]
        }
    }
]"#;

fn decode() -> Vec<RegulatoryElementData> {
    serde_json::from_str(RECORDS).unwrap()
}

#[test]
fn decoded_records_load_into_typed_elements() {
    let registry = Registry::with_builtin_kinds();
    let mut map = host_map();
    let ids = map
        .load_regulatory_elements(decode(), &registry, &LoaderConfig::default())
        .unwrap();
    assert_eq!(ids, vec![RegElemId::new(100), RegElemId::new(101)]);

    let rb = map
        .regulatory_element_as::<Roundabout>(RegElemId::new(100))
        .unwrap();
    assert_eq!(rb.roundabout_lanelet(), lanelet(1));
    assert_eq!(rb.roundabout_area(), vec![poly(20), poly(21)]);
    assert_eq!(rb.stop_lines(), vec![line(12)]);

    let generic = map.regulatory_element(RegElemId::new(101)).unwrap();
    assert!(generic.is::<GenericRegulatoryElement>());
    assert_eq!(generic.rule_name(), "speed_bump");

    let on_lanelet: Vec<_> = map
        .regulatory_elements_of_lanelet(lanelet(1))
        .iter()
        .map(|e| e.id())
        .collect();
    assert_eq!(on_lanelet, vec![RegElemId::new(100)]);
    map.validate_invariants().unwrap();
}

#[test]
fn strict_loader_rejects_unregistered_kinds() {
    let registry = Registry::with_builtin_kinds();
    let mut map = host_map();
    let config = LoaderConfig {
        on_unknown_rule: UnknownRulePolicy::Error,
    };
    let err = map
        .load_regulatory_elements(decode(), &registry, &config)
        .unwrap_err();
    assert_eq!(err, MapError::UnknownRuleName("speed_bump".into()));
    assert_eq!(map.num_regulatory_elements(), 1);
}

#[test]
fn mutated_element_reserializes_and_reloads() {
    let registry = Registry::with_builtin_kinds();
    let mut map = host_map();
    map.load_regulatory_elements(decode(), &registry, &LoaderConfig::default())
        .unwrap();

    let rb = map
        .regulatory_element_as_mut::<Roundabout>(RegElemId::new(100))
        .unwrap();
    assert!(rb.remove_roundabout_area(poly(20)));
    rb.add_roundabout_area(poly(22));

    let json = serde_json::to_string(rb.data()).unwrap();
    let record: RegulatoryElementData = serde_json::from_str(&json).unwrap();
    let rebuilt = registry.create(record).unwrap();
    let rebuilt = rebuilt.downcast_ref::<Roundabout>().unwrap();
    assert_eq!(rebuilt.roundabout_area(), vec![poly(21), poly(22)]);
    assert_eq!(rebuilt.roundabout_lanelet(), lanelet(1));
}

#[test]
fn wrong_parameter_kind_in_record_is_a_construction_error() {
    let json = r#"{
        "id": 200,
        "attributes": { "subtype": "roundabout" },
        "parameters": { "refers": [ { "polygon": 20 } ] }
    }"#;
    let record: RegulatoryElementData = serde_json::from_str(json).unwrap();
    let registry = Registry::with_builtin_kinds();
    assert_eq!(
        registry.create(record).unwrap_err(),
        MapError::WrongParameterKind {
            id: Id::new(200),
            role: "refers".into(),
            expected: "lanelet",
            found: "polygon",
        }
    );
}

#[test]
fn loosely_typed_records_still_load() {
    let json = r#"{
        "id": 5,
        "attributes": { "type": "regulatory_element", "subtype": "roundabout" },
        "parameters": {
            "refers": [ { "lanelet": 1 } ],
            "roundabout_polygon": [ { "polygon": 2 }, { "polygon": 2 } ],
            "ref_line": [ { "line_string": 3 }, { "polygon": 4 } ]
        }
    }"#;
    let record: RegulatoryElementData = serde_json::from_str(json).unwrap();
    let registry = Registry::with_builtin_kinds();
    let mut elem = registry.create(record).unwrap();
    let rb = elem.downcast_mut::<Roundabout>().unwrap();
    assert_eq!(rb.roundabout_lanelet(), lanelet(1));
    assert_eq!(rb.roundabout_area(), vec![poly(2)]);
    assert_eq!(rb.stop_lines(), vec![line(3)]);

    assert!(rb.remove_roundabout_area(poly(2)));
    assert!(rb.roundabout_area().is_empty());
}
