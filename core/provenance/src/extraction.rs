//! Recognises known material-property fields in a tool's raw JSON or textual
//! output and turns them into [`ExtractedValue`]s.

use regex_lite::Regex;
use serde::Deserialize;
use serde::Serialize;

/// A single numerical value pulled out of a tool's output, tagged with the
/// property it represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedValue {
    pub value: f64,
    pub original_string: String,
    pub unit: Option<String>,
    pub property_type: Option<String>,
}

impl ExtractedValue {
    pub fn new(value: f64, original_string: impl Into<String>, unit: Option<String>, property_type: &str) -> Self {
        Self {
            value,
            original_string: original_string.into(),
            unit,
            property_type: Some(property_type.to_string()),
        }
    }

    /// Whether `other` is within `tolerance` of this value.
    pub fn matches(&self, other: f64, tolerance: f64) -> bool {
        (self.value - other).abs() < tolerance
    }
}

/// Unwraps the `{type: "text", text: "<json>"}` wrapper some tool SDKs emit,
/// then scans the known property fields, recursing into any `structures`
/// array. Falls back to regex extraction when `output` is a bare string.
pub fn extract_values(output: &serde_json::Value) -> Vec<ExtractedValue> {
    let unwrapped = unwrap_text_envelope(output);

    match unwrapped {
        serde_json::Value::Object(_) => extract_from_object(&unwrapped),
        serde_json::Value::String(text) => extract_from_string(&text),
        _ => Vec::new(),
    }
}

fn unwrap_text_envelope(output: &serde_json::Value) -> serde_json::Value {
    if let Some(object) = output.as_object() {
        if object.get("type").and_then(|v| v.as_str()) == Some("text") {
            if let Some(text) = object.get("text").and_then(|v| v.as_str()) {
                if let Ok(parsed) = serde_json::from_str(text) {
                    return parsed;
                }
            }
        }
    }
    output.clone()
}

fn extract_from_object(output: &serde_json::Value) -> Vec<ExtractedValue> {
    let mut extracted = Vec::new();
    let Some(object) = output.as_object() else {
        return extracted;
    };

    push_scalar_field(&mut extracted, object, "formation_energy", "eV/atom", "formation_energy");
    push_scalar_field(&mut extracted, object, "energy_per_atom", "eV/atom", "energy_per_atom");
    push_scalar_field(&mut extracted, object, "total_energy", "eV", "total_energy");

    if object.contains_key("band_gap") {
        push_scalar_field(&mut extracted, object, "band_gap", "eV", "band_gap");
    } else if object.get("band_gap_ev").is_some_and(|v| !v.is_null()) {
        if let Some(value) = as_f64(object.get("band_gap_ev")) {
            extracted.push(ExtractedValue::new(value, object["band_gap_ev"].to_string(), Some("eV".to_string()), "band_gap"));
        }
    }

    push_scalar_field(&mut extracted, object, "energy_above_hull", "eV/atom", "energy_above_hull");
    push_scalar_field(&mut extracted, object, "bulk_modulus", "GPa", "bulk_modulus");

    if let Some(lattice) = object.get("lattice_params").and_then(|v| v.as_object()) {
        for param in ["a", "b", "c"] {
            if let Some(value) = as_f64(lattice.get(param)) {
                extracted.push(ExtractedValue::new(
                    value,
                    lattice[param].to_string(),
                    Some("Å".to_string()),
                    &format!("lattice_{param}"),
                ));
            }
        }
    }

    if object.contains_key("space_group_number") {
        if let Some(value) = as_f64(object.get("space_group_number")) {
            extracted.push(ExtractedValue::new(value, object["space_group_number"].to_string(), None, "space_group_number"));
        }
    } else if let Some(value) = as_f64(object.get("number")) {
        extracted.push(ExtractedValue::new(value, object["number"].to_string(), None, "space_group_number"));
    }

    if let Some(tensor) = object.get("stress_tensor").and_then(|v| v.as_array()) {
        for (i, row) in tensor.iter().enumerate() {
            if let Some(row) = row.as_array() {
                for (j, cell) in row.iter().enumerate() {
                    if let Some(value) = cell.as_f64() {
                        extracted.push(ExtractedValue::new(
                            value,
                            cell.to_string(),
                            Some("GPa".to_string()),
                            &format!("stress_{i}{j}"),
                        ));
                    }
                }
            }
        }
    }

    push_scalar_field(&mut extracted, object, "voltage", "V", "voltage");

    if let Some(value) = as_f64(object.get("capacity")) {
        let unit = object.get("capacity_unit").and_then(|v| v.as_str()).unwrap_or("mAh/g");
        extracted.push(ExtractedValue::new(value, object["capacity"].to_string(), Some(unit.to_string()), "capacity"));
    }

    if let Some(structures) = object.get("structures").and_then(|v| v.as_array()) {
        for structure in structures {
            extracted.extend(extract_from_object(structure));
        }
    }

    extracted
}

fn push_scalar_field(
    extracted: &mut Vec<ExtractedValue>,
    object: &serde_json::Map<String, serde_json::Value>,
    field: &str,
    default_unit: &str,
    property_type: &str,
) {
    if let Some(value) = as_f64(object.get(field)) {
        let unit = object.get("unit").and_then(|v| v.as_str()).unwrap_or(default_unit);
        extracted.push(ExtractedValue::new(value, object[field].to_string(), Some(unit.to_string()), property_type));
    }
}

fn as_f64(value: Option<&serde_json::Value>) -> Option<f64> {
    value.and_then(|v| v.as_f64())
}

struct StringPattern {
    regex: &'static str,
    property_type: &'static str,
    default_unit: Option<&'static str>,
}

const STRING_PATTERNS: &[StringPattern] = &[
    StringPattern {
        regex: r"(?i)formation\s+energy.*?(-?\d+\.?\d*)\s*eV",
        property_type: "formation_energy",
        default_unit: Some("eV"),
    },
    StringPattern {
        regex: r"(?i)band\s*gap.*?(\d+\.?\d*)\s*eV",
        property_type: "band_gap",
        default_unit: Some("eV"),
    },
    StringPattern {
        regex: r"(?i)lattice.*?(\d+\.?\d*)\s*(?:Å|angstrom)",
        property_type: "lattice_parameter",
        default_unit: Some("Å"),
    },
    StringPattern {
        regex: r"(?i)bulk\s+modulus.*?(\d+\.?\d*)\s*GPa",
        property_type: "bulk_modulus",
        default_unit: Some("GPa"),
    },
    StringPattern {
        regex: r"(?i)space\s+group.*?(\d+)",
        property_type: "space_group_number",
        default_unit: None,
    },
];

/// Regex fallback used when a tool returns plain text instead of structured
/// JSON.
fn extract_from_string(text: &str) -> Vec<ExtractedValue> {
    let mut extracted = Vec::new();
    for pattern in STRING_PATTERNS {
        let regex = Regex::new(pattern.regex).expect("static pattern is valid");
        for captures in regex.captures_iter(text) {
            let Some(value_match) = captures.get(1) else {
                continue;
            };
            if let Ok(value) = value_match.as_str().parse::<f64>() {
                extracted.push(ExtractedValue::new(
                    value,
                    value_match.as_str(),
                    pattern.default_unit.map(str::to_string),
                    pattern.property_type,
                ));
            }
        }
    }
    extracted
}

#[cfg(test)]
#[path = "extraction.test.rs"]
mod tests;
