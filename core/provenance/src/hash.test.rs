use super::*;

#[test]
fn hash16_is_16_hex_characters() {
    let digest = hash16("hello");
    assert_eq!(digest.len(), 16);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn hash16_is_stable() {
    assert_eq!(hash16("hello"), hash16("hello"));
    assert_ne!(hash16("hello"), hash16("world"));
}

#[test]
fn canonical_object_is_key_order_independent() {
    let a = serde_json::json!({"b": 1, "a": 2});
    let b = serde_json::json!({"a": 2, "b": 1});
    assert_eq!(canonical(&a), canonical(&b));
}

#[test]
fn canonical_scalar_uses_json_string_form() {
    assert_eq!(canonical(&serde_json::json!(-3.45)), "-3.45");
}
