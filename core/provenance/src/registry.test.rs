use super::*;

#[test]
fn round_trips_a_registered_value() {
    let mut registry = ProvenanceValueRegistry::new();
    let output = serde_json::json!({"formation_energy": -3.45, "formula": "LiCoO2"});
    registry.register_tool_output("mace", "call-1", &serde_json::json!({}), &output, "2026-01-01T00:00:00Z");

    let tuple = registry.lookup_provenance(-3.45, 0.01, Some("LiCoO2")).expect("value was registered");
    assert_eq!(tuple.source_tool, "mace");
    assert_eq!(tuple.unit.as_deref(), Some("eV/atom"));
}

#[test]
fn unregistered_value_returns_none() {
    let registry = ProvenanceValueRegistry::new();
    assert!(registry.lookup_provenance(-3.45, 0.01, None).is_none());
}

#[test]
fn near_zero_values_use_a_wider_tolerance() {
    let mut registry = ProvenanceValueRegistry::new();
    registry.register_tool_output("mace", "call-1", &serde_json::json!({}), &serde_json::json!({"formation_energy": 0.003}), "t");

    let tuple = registry.lookup_provenance(0.0, 0.01, None).expect("near-zero match via widened tolerance");
    assert_eq!(tuple.value, 0.003);
}

#[test]
fn lookup_material_properties_keeps_the_latest_per_property() {
    let mut registry = ProvenanceValueRegistry::new();
    let output = serde_json::json!({"band_gap": 1.1, "formula": "LiCoO2"});
    registry.register_tool_output("mace", "call-1", &serde_json::json!({}), &output, "2026-01-01T00:00:00Z");
    let output2 = serde_json::json!({"band_gap": 1.4, "formula": "LiCoO2"});
    registry.register_tool_output("mace", "call-2", &serde_json::json!({}), &output2, "2026-01-02T00:00:00Z");

    let properties = registry.lookup_material_properties("LiCoO2");
    assert_eq!(properties.get("band_gap").map(|p| p.value), Some(1.4));
}

#[test]
fn clear_resets_every_index() {
    let mut registry = ProvenanceValueRegistry::new();
    registry.register_tool_output("mace", "call-1", &serde_json::json!({}), &serde_json::json!({"formation_energy": -1.0}), "t");
    registry.clear();
    assert!(registry.lookup_provenance(-1.0, 0.01, None).is_none());
}
