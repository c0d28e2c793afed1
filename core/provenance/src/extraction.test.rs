use super::*;

#[test]
fn extracts_formation_energy_with_default_unit() {
    let output = serde_json::json!({"formation_energy": -3.45});
    let values = extract_values(&output);
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, -3.45);
    assert_eq!(values[0].unit.as_deref(), Some("eV/atom"));
    assert_eq!(values[0].property_type.as_deref(), Some("formation_energy"));
}

#[test]
fn prefers_explicit_unit_over_default() {
    let output = serde_json::json!({"formation_energy": -3.45, "unit": "kJ/mol"});
    let values = extract_values(&output);
    assert_eq!(values[0].unit.as_deref(), Some("kJ/mol"));
}

#[test]
fn extracts_lattice_parameters() {
    let output = serde_json::json!({"lattice_params": {"a": 4.1, "b": 4.1, "c": 9.8}});
    let values = extract_values(&output);
    assert_eq!(values.len(), 3);
    assert!(values.iter().any(|v| v.property_type.as_deref() == Some("lattice_a")));
}

#[test]
fn extracts_stress_tensor_components() {
    let output = serde_json::json!({"stress_tensor": [[1.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 3.0]]});
    let values = extract_values(&output);
    assert_eq!(values.len(), 9);
    assert!(values.iter().any(|v| v.property_type.as_deref() == Some("stress_11") && v.value == 2.0));
}

#[test]
fn unwraps_text_envelope() {
    let output = serde_json::json!({"type": "text", "text": "{\"band_gap\": 1.1}"});
    let values = extract_values(&output);
    assert_eq!(values[0].property_type.as_deref(), Some("band_gap"));
    assert_eq!(values[0].value, 1.1);
}

#[test]
fn recurses_into_nested_structures() {
    let output = serde_json::json!({"structures": [{"formation_energy": -1.0}, {"formation_energy": -2.0}]});
    let values = extract_values(&output);
    assert_eq!(values.len(), 2);
}

#[test]
fn falls_back_to_regex_on_plain_text() {
    let values = extract_values(&serde_json::json!("formation energy is -3.45 eV for this compound"));
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, -3.45);
    assert_eq!(values[0].property_type.as_deref(), Some("formation_energy"));
}

#[test]
fn space_group_number_falls_back_to_number_field() {
    let output = serde_json::json!({"number": 225});
    let values = extract_values(&output);
    assert_eq!(values[0].property_type.as_deref(), Some("space_group_number"));
    assert_eq!(values[0].value, 225.0);
}
