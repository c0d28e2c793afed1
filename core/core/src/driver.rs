//! Ties the parallel executor, provenance registry, render gate and context
//! compactor together into the per-turn sequence described by this
//! codebase's agent loop: queue the model's tool calls, drain them, register
//! their outputs as artefacts, gate the model's reply text, then compact the
//! transcript if it has grown too large.

use std::collections::HashMap;
use std::sync::Arc;

use crystalyse_async_utils::CancellationToken;
use crystalyse_compaction::CompactionResult;
use crystalyse_compaction::ContextManager;
use crystalyse_compaction::Message;
use crystalyse_executor::ParallelToolExecutor;
use crystalyse_executor::ToolCall;
use crystalyse_executor::ToolMetrics;
use crystalyse_executor::ToolResult;
use crystalyse_executor::TurnMetrics;
use crystalyse_provenance::DetectedNumber;
use crystalyse_provenance::ProvenanceValueRegistry;
use crystalyse_sandbox::SandboxPolicy;
use tokio::sync::Mutex;

use crate::config::CoreConfig;
use crate::error::InvalidConfigSnafu;
use crate::error::Result;
use crate::event::Event;
use crate::event::EventSink;

/// One tool call the model asked for this turn, prior to call-id allocation.
#[derive(Debug, Clone)]
pub struct PendingCall {
    pub name: String,
    pub input: serde_json::Value,
}

/// The model's textual reply after it has passed through the render gate.
#[derive(Debug, Clone)]
pub struct RenderedReply {
    pub text: String,
    pub detected: Vec<DetectedNumber>,
    pub has_violations: bool,
}

/// Owns every piece of per-session state the turn sequence needs: the
/// executor's tool registry and lock, the provenance registry, and the
/// growing transcript. One driver serves an entire conversation across many
/// turns; `turn_id` scopes call-id allocation and event records to a single
/// turn within it.
pub struct TurnDriver {
    executor: ParallelToolExecutor,
    compactor: ContextManager,
    registry: Mutex<ProvenanceValueRegistry>,
    transcript: Mutex<Vec<Message>>,
    sandbox: SandboxPolicy,
    event_sink: Option<Arc<dyn EventSink>>,
}

impl TurnDriver {
    pub fn new(config: CoreConfig) -> Result<Self> {
        let executor = ParallelToolExecutor::with_timeout(config.tools, config.per_call_timeout).map_err(|err| {
            InvalidConfigSnafu {
                reason: err.to_string(),
            }
            .build()
        })?;

        let mut compactor = ContextManager::new(config.compaction);
        if let Some(summariser) = config.summariser {
            compactor = compactor.with_summariser(summariser);
        }

        Ok(Self {
            executor,
            compactor,
            registry: Mutex::new(ProvenanceValueRegistry::new()),
            transcript: Mutex::new(Vec::new()),
            sandbox: config.sandbox,
            event_sink: config.event_sink,
        })
    }

    /// The sandbox policy every subprocess-backed tool handler should apply;
    /// handlers are constructed by the caller and hold their own reference
    /// to this, since the driver has no visibility into which tools spawn
    /// subprocesses.
    pub fn sandbox_policy(&self) -> &SandboxPolicy {
        &self.sandbox
    }

    /// Queues every call of one model turn, drains them in submission
    /// order, registers each successful result's input/output pair as a
    /// provenance artefact, and reports a [`TurnMetrics`] aggregate to the
    /// event sink.
    pub async fn execute_tool_calls(
        &self,
        turn_id: &str,
        turn_token: &CancellationToken,
        calls: Vec<PendingCall>,
    ) -> Vec<ToolResult> {
        let mut call_inputs: HashMap<String, (String, serde_json::Value)> = HashMap::with_capacity(calls.len());
        let mut turn_metrics = TurnMetrics::new(turn_id);

        for (index, call) in calls.into_iter().enumerate() {
            let call_id = format!("{turn_id}-{index}");
            let child_token = turn_token.child_token();
            let parallel = self.executor.supports_parallel(&call.name);
            turn_metrics.add_tool(ToolMetrics::start(call.name.clone(), call_id.clone(), parallel));
            call_inputs.insert(call_id.clone(), (call.name.clone(), call.input.clone()));
            self.executor
                .queue(
                    ToolCall {
                        id: call_id,
                        name: call.name,
                        input: call.input,
                    },
                    child_token,
                )
                .await;
        }

        let results = self.executor.drain().await;
        self.register_artefacts(turn_id, &results, &call_inputs).await;

        for (metric, result) in turn_metrics.tool_calls.iter_mut().zip(&results) {
            metric.complete(!result.is_error(), result.error.clone());
        }
        turn_metrics.log_summary();
        if let Some(sink) = &self.event_sink {
            sink.record(Event::Turn(turn_metrics)).await;
        }

        results
    }

    async fn register_artefacts(
        &self,
        turn_id: &str,
        results: &[ToolResult],
        call_inputs: &HashMap<String, (String, serde_json::Value)>,
    ) {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let mut registry = self.registry.lock().await;

        for result in results {
            if result.is_error() {
                continue;
            }
            let Some((tool_name, input)) = call_inputs.get(&result.tool_call_id) else {
                continue;
            };

            let output = parse_tool_output(&result.content);
            let extracted_count_before = registry.tracker().statistics().total_values;
            let artifact_id = registry.register_tool_output(tool_name, &result.tool_call_id, input, &output, timestamp.clone());
            let extracted_values = registry.tracker().statistics().total_values - extracted_count_before;

            if let Some(sink) = &self.event_sink {
                sink.record(Event::ArtefactRegistered {
                    turn_id: turn_id.to_string(),
                    artifact_id,
                    extracted_values,
                })
                .await;
            }
        }
    }

    /// Passes the model's textual reply through the render gate, checking
    /// every detected material-property number against the registry
    /// accumulated so far this session.
    pub async fn render_reply(&self, turn_id: &str, text: &str) -> RenderedReply {
        let registry = self.registry.lock().await;
        let registry_ref: &ProvenanceValueRegistry = &registry;
        let (text, detected, has_violations) = crystalyse_provenance::analyze(text, Some(registry_ref));
        drop(registry);

        if has_violations {
            let flagged_count = detected.iter().filter(|n| !n.flags.is_empty()).count();
            if let Some(sink) = &self.event_sink {
                sink.record(Event::RenderGateViolation {
                    turn_id: turn_id.to_string(),
                    flagged_count,
                })
                .await;
            }
        }

        RenderedReply {
            text,
            detected,
            has_violations,
        }
    }

    /// Appends `message` to the session transcript and compacts it if it
    /// has grown past the configured token threshold.
    pub async fn append_and_maybe_compact(&self, turn_id: &str, message: Message) -> CompactionResult {
        let mut transcript = self.transcript.lock().await;
        transcript.push(message);
        let pending = std::mem::take(&mut *transcript);

        let result = self.compactor.compact_if_needed(pending).await;
        *transcript = result.messages.clone();
        drop(transcript);

        if result.compacted {
            if let Some(sink) = &self.event_sink {
                sink.record(Event::Compacted {
                    turn_id: turn_id.to_string(),
                    original_count: result.original_count,
                    final_count: result.final_count,
                })
                .await;
            }
        }

        result
    }

    pub async fn transcript_len(&self) -> usize {
        self.transcript.lock().await.len()
    }
}

/// Tool results are stringified JSON (or a bare string pass-through); parses
/// it back into a value the provenance extractor can scan structurally,
/// falling back to a plain JSON string if it isn't valid JSON.
fn parse_tool_output(content: &str) -> serde_json::Value {
    serde_json::from_str(content).unwrap_or_else(|_| serde_json::Value::String(content.to_string()))
}

#[cfg(test)]
#[path = "driver.test.rs"]
mod tests;
