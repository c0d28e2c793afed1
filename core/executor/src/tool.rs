//! Tool specs, calls, and results.

use std::sync::Arc;

use crystalyse_error::BoxedError;
use serde::Deserialize;
use serde::Serialize;

use crate::classification::classify_tool;

/// A tool's handler, invoked with its call's JSON input and returning JSON
/// output. Handlers report their own failures through the `Result`; the
/// executor never panics a handler failure into a crashed turn, it turns it
/// into a [`ToolResult::error`].
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, input: serde_json::Value) -> Result<serde_json::Value, BoxedError>;
}

/// Registration of one tool with the executor.
#[derive(Clone)]
pub struct ToolSpec {
    pub name: String,
    pub handler: Arc<dyn ToolHandler>,
    pub supports_parallel: bool,
    pub description: String,
}

impl ToolSpec {
    /// Builds a spec whose `supports_parallel` flag is looked up from the
    /// static classification table in [`crate::classification`].
    pub fn new(name: impl Into<String>, handler: Arc<dyn ToolHandler>) -> Self {
        let name = name.into();
        let supports_parallel = classify_tool(&name);
        Self {
            name,
            handler,
            supports_parallel,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Overrides the classification table's default, for a tool whose
    /// concurrency safety is known better than the static list can express.
    pub fn with_supports_parallel(mut self, supports_parallel: bool) -> Self {
        self.supports_parallel = supports_parallel;
        self
    }
}

/// A single tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub input: serde_json::Value,
}

/// The outcome of running one [`ToolCall`]. `error` is populated instead of
/// propagating a `Result::Err` so a batch of tool calls can always be drained
/// in full and reported back to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub content: String,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn ok(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
            error: None,
        }
    }

    pub fn failed(tool_call_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
