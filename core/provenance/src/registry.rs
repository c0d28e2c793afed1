//! Central registry mapping numeric values back to the tool call that
//! produced them, used by the render gate to verify material-property
//! claims.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::artifact::ArtifactTracker;
use crate::hash::value_key;
use crate::material;

/// Tolerance used when `|value| < NEAR_ZERO_THRESHOLD`: models often round
/// small magnitudes to exactly zero, so a much wider window is used to still
/// find a match.
const NEAR_ZERO_THRESHOLD: f64 = 0.01;
const NEAR_ZERO_TOLERANCE: f64 = 0.5;

/// The provenance record attached to a numeric value, in the shape the
/// render gate consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceTuple {
    pub value: f64,
    pub unit: Option<String>,
    pub source_tool: String,
    pub artifact_hash: String,
    pub timestamp: String,
    pub confidence: Option<f64>,
}

/// A value together with its full provenance, as stored in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvencedValue {
    pub value: f64,
    pub unit: Option<String>,
    pub source_tool: String,
    pub artifact_hash: String,
    pub timestamp: String,
    pub confidence: Option<f64>,
    pub property_type: Option<String>,
    pub material: Option<String>,
}

impl ProvencedValue {
    fn to_tuple(&self) -> ProvenanceTuple {
        ProvenanceTuple {
            value: self.value,
            unit: self.unit.clone(),
            source_tool: self.source_tool.clone(),
            artifact_hash: self.artifact_hash.clone(),
            timestamp: self.timestamp.clone(),
            confidence: self.confidence,
        }
    }
}

/// Combines artefact tracking with a value-keyed and material-keyed index
/// for fast provenance lookup.
#[derive(Debug, Default)]
pub struct ProvenanceValueRegistry {
    tracker: ArtifactTracker,
    registry: HashMap<String, Vec<ProvencedValue>>,
    material_registry: HashMap<String, Vec<ProvencedValue>>,
}

impl ProvenanceValueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool output with the underlying artefact tracker, then
    /// indexes every extracted value here. Returns the artefact id.
    pub fn register_tool_output(
        &mut self,
        tool_name: &str,
        tool_call_id: &str,
        input: &serde_json::Value,
        output: &serde_json::Value,
        timestamp: impl Into<String>,
    ) -> String {
        let artifact_id = self.tracker.register_tool_output(tool_name, tool_call_id, input, output, timestamp);
        let artifact = self.tracker.get(&artifact_id).expect("just registered").clone();
        let material = material::extract_field(output).or_else(|| output.as_str().and_then(material::extract_from_text));

        for extracted in &artifact.extracted_values {
            let provenanced = ProvencedValue {
                value: extracted.value,
                unit: extracted.unit.clone(),
                source_tool: tool_name.to_string(),
                artifact_hash: artifact_id.clone(),
                timestamp: artifact.timestamp.clone(),
                confidence: artifact.confidence,
                property_type: extracted.property_type.clone(),
                material: material.clone(),
            };

            self.registry.entry(value_key(extracted.value)).or_default().push(provenanced.clone());

            if let Some(material) = &material {
                self.material_registry.entry(material.clone()).or_default().push(provenanced);
            }
        }

        artifact_id
    }

    /// Looks up provenance for `value`, optionally preferring a match whose
    /// recorded material equals `material`.
    pub fn lookup_provenance(&self, value: f64, tolerance: f64, material: Option<&str>) -> Option<ProvenanceTuple> {
        if value.abs() < NEAR_ZERO_THRESHOLD {
            if let Some(tuple) = self.lookup_near_zero(value, material) {
                return Some(tuple);
            }
        }

        if let Some(candidates) = self.registry.get(&value_key(value)) {
            if let Some(tuple) = Self::prefer_material(candidates, material) {
                return Some(tuple);
            }
        }

        for candidates in self.registry.values() {
            if candidates.iter().any(|c| (c.value - value).abs() < tolerance) {
                let fuzzy: Vec<_> = candidates.iter().filter(|c| (c.value - value).abs() < tolerance).cloned().collect();
                if let Some(tuple) = Self::prefer_material(&fuzzy, material) {
                    return Some(tuple);
                }
            }
        }

        self.tracker.lookup_value(value, tolerance).first().map(|(artifact, extracted)| ProvenanceTuple {
            value: extracted.value,
            unit: extracted.unit.clone(),
            source_tool: artifact.tool_name.clone(),
            artifact_hash: artifact.output_hash.clone(),
            timestamp: artifact.timestamp.clone(),
            confidence: artifact.confidence,
        })
    }

    fn lookup_near_zero(&self, value: f64, material: Option<&str>) -> Option<ProvenanceTuple> {
        for candidates in self.registry.values() {
            let matching: Vec<_> =
                candidates.iter().filter(|c| (c.value - value).abs() < NEAR_ZERO_TOLERANCE).cloned().collect();
            if let Some(tuple) = Self::prefer_material(&matching, material) {
                return Some(tuple);
            }
        }

        let matches = self.tracker.lookup_value(value, NEAR_ZERO_TOLERANCE);
        matches.first().map(|(artifact, extracted)| ProvenanceTuple {
            value: extracted.value,
            unit: extracted.unit.clone(),
            source_tool: artifact.tool_name.clone(),
            artifact_hash: artifact.output_hash.clone(),
            timestamp: artifact.timestamp.clone(),
            confidence: artifact.confidence,
        })
    }

    fn prefer_material(candidates: &[ProvencedValue], material: Option<&str>) -> Option<ProvenanceTuple> {
        if candidates.is_empty() {
            return None;
        }
        if let Some(material) = material {
            if let Some(found) = candidates.iter().find(|c| c.material.as_deref() == Some(material)) {
                return Some(found.to_tuple());
            }
        }
        candidates.first().map(ProvencedValue::to_tuple)
    }

    /// Returns the most recently registered value for every property tracked
    /// under `material`.
    pub fn lookup_material_properties(&self, material: &str) -> HashMap<String, ProvencedValue> {
        let mut properties: HashMap<String, ProvencedValue> = HashMap::new();
        let Some(candidates) = self.material_registry.get(material) else {
            return properties;
        };

        for candidate in candidates {
            let Some(property_type) = &candidate.property_type else {
                continue;
            };
            let replace = match properties.get(property_type) {
                Some(existing) => candidate.timestamp > existing.timestamp,
                None => true,
            };
            if replace {
                properties.insert(property_type.clone(), candidate.clone());
            }
        }

        properties
    }

    pub fn clear(&mut self) {
        self.registry.clear();
        self.material_registry.clear();
        self.tracker = ArtifactTracker::new();
        tracing::info!("provenance registry cleared");
    }

    pub fn tracker(&self) -> &ArtifactTracker {
        &self.tracker
    }
}

#[cfg(test)]
#[path = "registry.test.rs"]
mod tests;
