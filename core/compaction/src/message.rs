//! The transcript unit the compactor reads and rewrites.

use serde::Deserialize;
use serde::Serialize;

/// A single transcript entry.
///
/// `content` is a plain string rather than the richer multi-part content a
/// model API might hand back; callers are expected to have already flattened
/// tool-call blocks, citations, and similar structure into text before
/// handing messages to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            name: None,
            metadata: serde_json::Map::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// The outcome of a single [`crate::manager::ContextManager::compact_if_needed`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactionResult {
    pub messages: Vec<Message>,
    pub summary: Option<String>,
    pub original_count: usize,
    pub final_count: usize,
    pub compacted: bool,
}

impl CompactionResult {
    pub(crate) fn unchanged(messages: Vec<Message>) -> Self {
        let count = messages.len();
        Self {
            messages,
            summary: None,
            original_count: count,
            final_count: count,
            compacted: false,
        }
    }
}
