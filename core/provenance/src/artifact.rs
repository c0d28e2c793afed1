//! Records every tool invocation as a hashed, content-addressed artefact so
//! numeric claims in model output can be traced back to their source.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::extraction::ExtractedValue;
use crate::extraction::extract_values;
use crate::hash::canonical;
use crate::hash::hash16;
use crate::hash::value_key;

/// A single recorded tool call: its hashed input/output and whatever
/// numerical values were recognised in the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub tool_name: String,
    pub tool_call_id: String,
    pub input_hash: String,
    pub output_hash: String,
    pub timestamp: String,
    pub raw_output: serde_json::Value,
    pub extracted_values: Vec<ExtractedValue>,
    pub confidence: Option<f64>,
}

/// Statistics describing what a tracker currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArtifactStatistics {
    pub total_artifacts: usize,
    pub total_values: usize,
    pub unique_values: usize,
}

/// Tracks artefacts keyed by their output hash and indexes extracted values
/// for reverse lookup.
#[derive(Debug, Default)]
pub struct ArtifactTracker {
    artifacts: HashMap<String, Artifact>,
    value_index: HashMap<String, Vec<String>>,
    tool_call_index: HashMap<String, String>,
}

impl ArtifactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool's input/output pair, hashing both and extracting
    /// whatever numerical values are recognised. Returns the artefact id
    /// (its output hash).
    pub fn register_tool_output(
        &mut self,
        tool_name: &str,
        tool_call_id: &str,
        input: &serde_json::Value,
        output: &serde_json::Value,
        timestamp: impl Into<String>,
    ) -> String {
        let input_hash = hash16(&canonical(input));
        let output_hash = hash16(&canonical(output));
        let extracted_values = extract_values(output);

        let artifact_id = output_hash.clone();
        for value in &extracted_values {
            self.value_index.entry(value_key(value.value)).or_default().push(artifact_id.clone());
        }

        let artifact = Artifact {
            tool_name: tool_name.to_string(),
            tool_call_id: tool_call_id.to_string(),
            input_hash,
            output_hash,
            timestamp: timestamp.into(),
            raw_output: output.clone(),
            extracted_values,
            confidence: None,
        };

        tracing::info!(tool = tool_name, values = artifact.extracted_values.len(), "registered artefact");

        self.tool_call_index.insert(tool_call_id.to_string(), artifact_id.clone());
        self.artifacts.insert(artifact_id.clone(), artifact);
        artifact_id
    }

    pub fn get(&self, artifact_id: &str) -> Option<&Artifact> {
        self.artifacts.get(artifact_id)
    }

    pub fn artifacts(&self) -> impl Iterator<Item = (&String, &Artifact)> {
        self.artifacts.iter()
    }

    /// Finds every `(Artifact, ExtractedValue)` whose value is exactly
    /// `value` or within `tolerance` of it.
    pub fn lookup_value(&self, value: f64, tolerance: f64) -> Vec<(&Artifact, &ExtractedValue)> {
        let mut matches = Vec::new();

        if let Some(artifact_ids) = self.value_index.get(&value_key(value)) {
            for artifact_id in artifact_ids {
                if let Some(artifact) = self.artifacts.get(artifact_id) {
                    matches.extend(artifact.extracted_values.iter().filter(|v| v.value == value).map(|v| (artifact, v)));
                }
            }
        }

        for artifact in self.artifacts.values() {
            for extracted in &artifact.extracted_values {
                if extracted.value != value && extracted.matches(value, tolerance) {
                    matches.push((artifact, extracted));
                }
            }
        }

        matches
    }

    pub fn statistics(&self) -> ArtifactStatistics {
        ArtifactStatistics {
            total_artifacts: self.artifacts.len(),
            total_values: self.artifacts.values().map(|a| a.extracted_values.len()).sum(),
            unique_values: self.value_index.len(),
        }
    }
}

#[cfg(test)]
#[path = "artifact.test.rs"]
mod tests;
