use super::*;

#[test]
fn unprovenanced_material_property_is_flagged() {
    let (_, detected, has_violations) = analyze("The formation energy is -3.45 eV/atom.", None);

    assert!(has_violations);
    let flagged = detected.iter().find(|n| n.number_type == NumberType::MaterialProperty).expect("one material property detected");
    assert!(flagged.flags.contains(UNPROVENANCED_FLAG));
}

#[test]
fn registered_material_property_is_not_flagged() {
    let mut registry = ProvenanceValueRegistry::new();
    registry.register_tool_output(
        "mace",
        "call-1",
        &serde_json::json!({}),
        &serde_json::json!({"formation_energy": -3.45}),
        "2026-01-01T00:00:00Z",
    );

    let (_, _, has_violations) = analyze("The formation energy is -3.45 eV/atom.", Some(&registry));
    assert!(!has_violations);
}

#[test]
fn hedged_property_language_is_reclassified_away_from_material_property() {
    let (_, detected, has_violations) =
        analyze("Band gaps in this material family are typically reported around 1 to 3 eV.", None);
    assert!(!has_violations);
    assert!(detected.iter().all(|n| n.number_type != NumberType::MaterialProperty));
}

#[test]
fn statistical_counts_are_not_material_properties() {
    let (_, detected, _) = analyze("Out of 10 candidate structures, 7 passed the stability screen.", None);
    assert!(detected.iter().all(|n| n.number_type == NumberType::Statistical || n.number_type == NumberType::Unknown));
}

#[test]
fn literature_reference_is_classified_as_literature() {
    let (_, detected, _) = analyze("According to the Materials Project database, MP-1234 has a band gap of 2.1 eV.", None);
    assert!(detected.iter().any(|n| n.number_type == NumberType::Literature));
}

#[test]
fn derived_value_from_arithmetic_is_classified_as_derived() {
    let (_, detected, _) = analyze("The total is 2 + 3 = 5.", None);
    assert!(detected.iter().any(|n| n.number_type == NumberType::Derived));
}

#[test]
fn split_sentences_keeps_decimals_intact() {
    let sentences = split_sentences("The value is -3.45 eV. It is stable.");
    assert_eq!(sentences[0], "The value is -3.45 eV");
    assert_eq!(sentences[1], " It is stable");
}
