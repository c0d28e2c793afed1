//! Chemical-formula heuristics shared by the artefact tracker and render gate.

use regex_lite::Regex;

/// Matches a run of element-like tokens, e.g. `LiCoO2`, `CaTiO3`.
fn formula_run_pattern() -> Regex {
    Regex::new(r"[A-Z][a-z]?\d*(?:[A-Z][a-z]?\d*)*").expect("static pattern is valid")
}

/// Matches a single element-like token within a run.
fn element_pattern() -> Regex {
    Regex::new(r"[A-Z][a-z]?").expect("static pattern is valid")
}

/// Looks for a known composition field (`formula`, `composition`, `material`,
/// `compound`) on a tool-output object.
pub fn extract_field(output: &serde_json::Value) -> Option<String> {
    let object = output.as_object()?;
    for field in ["formula", "composition", "material", "compound"] {
        if let Some(value) = object.get(field) {
            return Some(scalar_to_string(value));
        }
    }
    None
}

/// Scans free text for the first run of element-like tokens containing at
/// least two distinct elements, e.g. extracting `LiCoO2` from a sentence.
pub fn extract_from_text(text: &str) -> Option<String> {
    let run_pattern = formula_run_pattern();
    let element_pattern = element_pattern();

    for candidate in run_pattern.find_iter(text) {
        let elements = element_pattern.find_iter(candidate.as_str()).count();
        if elements >= 2 {
            return Some(candidate.as_str().to_string());
        }
    }
    None
}

fn scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "material.test.rs"]
mod tests;
