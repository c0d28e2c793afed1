use super::*;

#[test]
fn register_extracts_and_indexes_values() {
    let mut tracker = ArtifactTracker::new();
    let output = serde_json::json!({"formation_energy": -3.45, "composition": "LiCoO2"});
    let artifact_id = tracker.register_tool_output("mace", "call-1", &serde_json::json!({}), &output, "2026-01-01T00:00:00Z");

    let artifact = tracker.get(&artifact_id).expect("artifact was registered");
    assert_eq!(artifact.tool_name, "mace");
    assert_eq!(artifact.extracted_values.len(), 1);

    let matches = tracker.lookup_value(-3.45, 0.01);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].0.output_hash, artifact_id);
}

#[test]
fn lookup_value_applies_fuzzy_tolerance() {
    let mut tracker = ArtifactTracker::new();
    tracker.register_tool_output("mace", "call-1", &serde_json::json!({}), &serde_json::json!({"formation_energy": -3.45}), "t");

    assert!(tracker.lookup_value(-3.46, 0.05).len() == 1);
    assert!(tracker.lookup_value(-3.9, 0.05).is_empty());
}

#[test]
fn registering_the_same_output_twice_indexes_it_twice() {
    let mut tracker = ArtifactTracker::new();
    let output = serde_json::json!({"formation_energy": -3.45});
    let first_id = tracker.register_tool_output("mace", "call-1", &serde_json::json!({}), &output, "t");
    let second_id = tracker.register_tool_output("mace", "call-2", &serde_json::json!({}), &output, "t");

    assert_eq!(first_id, second_id);
    assert_eq!(tracker.lookup_value(-3.45, 0.01).len(), 2);
}

#[test]
fn statistics_report_totals() {
    let mut tracker = ArtifactTracker::new();
    tracker.register_tool_output("mace", "call-1", &serde_json::json!({}), &serde_json::json!({"formation_energy": -1.0}), "t");
    let stats = tracker.statistics();
    assert_eq!(stats.total_artifacts, 1);
    assert_eq!(stats.total_values, 1);
}
