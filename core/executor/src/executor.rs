//! Parallel tool executor: read-only tool calls run concurrently with each
//! other, mutating calls are serialised, and results are always returned in
//! the order calls were queued regardless of completion order.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crystalyse_async_utils::AsyncRwLock;
use crystalyse_async_utils::CancellationToken;
use crystalyse_async_utils::OrCancelExt;
use crystalyse_async_utils::OrderedFutures;
use tokio::sync::Mutex;

use crate::error::DuplicateToolSnafu;
use crate::error::Result;
use crate::tool::ToolCall;
use crate::tool::ToolResult;
use crate::tool::ToolSpec;

/// Applied to a tool call with no explicit per-call override.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// The state shared with spawned tool-call tasks, kept behind an `Arc` so
/// [`ParallelToolExecutor::queue`] can hand owned, `'static` futures to
/// [`OrderedFutures`] without borrowing the executor itself.
struct Inner {
    tools: HashMap<String, ToolSpec>,
    timeout: Duration,
    lock: AsyncRwLock<()>,
}

/// Executes a registered set of tools, serialising mutations against both
/// reads and other mutations via a fair read/write lock, while letting reads
/// run fully concurrently with each other.
pub struct ParallelToolExecutor {
    inner: Arc<Inner>,
    in_flight: Mutex<Option<OrderedFutures<ToolResult>>>,
}

impl ParallelToolExecutor {
    pub fn new(tools: Vec<ToolSpec>) -> Result<Self> {
        Self::with_timeout(tools, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(tools: Vec<ToolSpec>, timeout: Duration) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(tools.len());
        for spec in tools {
            let name = spec.name.clone();
            if by_name.insert(name.clone(), spec).is_some() {
                return DuplicateToolSnafu { name }.fail();
            }
        }
        Ok(Self {
            inner: Arc::new(Inner {
                tools: by_name,
                timeout,
                lock: AsyncRwLock::new(()),
            }),
            in_flight: Mutex::new(None),
        })
    }

    /// Whether `tool_name` is registered and marked as parallel-safe.
    pub fn supports_parallel(&self, tool_name: &str) -> bool {
        self.inner.tools.get(tool_name).is_some_and(|spec| spec.supports_parallel)
    }

    /// Queues `tool_call` for execution; it runs immediately in the
    /// background rather than waiting for [`Self::drain`].
    pub async fn queue(&self, tool_call: ToolCall, cancellation_token: CancellationToken) {
        let parallel = self.supports_parallel(&tool_call.name);
        tracing::debug!(tool = %tool_call.name, parallel, "queued tool call");

        let inner = Arc::clone(&self.inner);
        let mut in_flight = self.in_flight.lock().await;
        let queue = in_flight.get_or_insert_with(OrderedFutures::new);
        queue.push(execute_one(inner, tool_call, cancellation_token));
    }

    /// Awaits every queued call and returns their results in call order,
    /// resetting the queue for the next batch.
    pub async fn drain(&self) -> Vec<ToolResult> {
        let queue = self.in_flight.lock().await.take();
        match queue {
            Some(queue) => queue.drain().await,
            None => Vec::new(),
        }
    }

    pub async fn pending_count(&self) -> usize {
        self.in_flight.lock().await.as_ref().map_or(0, OrderedFutures::len)
    }
}

async fn execute_one(inner: Arc<Inner>, tool_call: ToolCall, cancellation_token: CancellationToken) -> ToolResult {
    let Some(tool_spec) = inner.tools.get(&tool_call.name).cloned() else {
        return ToolResult::failed(tool_call.id, format!("Unknown tool: {}", tool_call.name));
    };

    if cancellation_token.is_cancelled() {
        return ToolResult::failed(tool_call.id, "Cancelled");
    }

    let outcome = if tool_spec.supports_parallel {
        let Ok(_guard) = inner.lock.read().or_cancel(&cancellation_token).await else {
            return ToolResult::failed(tool_call.id, "Cancelled");
        };
        tokio::time::timeout(inner.timeout, tool_spec.handler.call(tool_call.input)).await
    } else {
        let Ok(_guard) = inner.lock.write().or_cancel(&cancellation_token).await else {
            return ToolResult::failed(tool_call.id, "Cancelled");
        };
        tokio::time::timeout(inner.timeout, tool_spec.handler.call(tool_call.input)).await
    };

    match outcome {
        Ok(Ok(value)) => ToolResult::ok(tool_call.id, json_to_content(&value)),
        Ok(Err(err)) => {
            tracing::error!(tool = %tool_call.name, error = %err, "tool failed");
            ToolResult::failed(tool_call.id, err.to_string())
        }
        Err(_) => {
            tracing::warn!(tool = %tool_call.name, "tool timed out");
            ToolResult::failed(
                tool_call.id,
                format!("Tool timed out after {}s", inner.timeout.as_secs()),
            )
        }
    }
}

fn json_to_content(value: &serde_json::Value) -> String {
    if value.is_string() {
        value.as_str().unwrap_or_default().to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "executor.test.rs"]
mod tests;
