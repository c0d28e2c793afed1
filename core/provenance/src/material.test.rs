use super::*;

#[test]
fn extract_field_prefers_formula() {
    let output = serde_json::json!({"formula": "LiCoO2", "composition": "other"});
    assert_eq!(extract_field(&output), Some("LiCoO2".to_string()));
}

#[test]
fn extract_field_returns_none_without_known_fields() {
    let output = serde_json::json!({"energy": 1.0});
    assert_eq!(extract_field(&output), None);
}

#[test]
fn extract_from_text_finds_a_formula_with_two_elements() {
    assert_eq!(extract_from_text("The formation energy of LiCoO2 is low."), Some("LiCoO2".to_string()));
}

#[test]
fn extract_from_text_ignores_single_element_tokens() {
    assert_eq!(extract_from_text("The sample was heated to O for a while."), None);
}
