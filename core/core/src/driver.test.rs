use std::time::Duration;

use crystalyse_error::BoxedError;
use crystalyse_executor::ToolHandler;
use crystalyse_executor::ToolSpec;
use tokio::sync::Mutex as TokioMutex;

use super::*;

struct EchoHandler;

#[async_trait::async_trait]
impl ToolHandler for EchoHandler {
    async fn call(&self, input: serde_json::Value) -> std::result::Result<serde_json::Value, BoxedError> {
        Ok(input)
    }
}

struct MaceHandler;

#[async_trait::async_trait]
impl ToolHandler for MaceHandler {
    async fn call(&self, _input: serde_json::Value) -> std::result::Result<serde_json::Value, BoxedError> {
        Ok(serde_json::json!({"formation_energy": -3.45, "formula": "LiCoO2"}))
    }
}

struct SlowHandler;

#[async_trait::async_trait]
impl ToolHandler for SlowHandler {
    async fn call(&self, input: serde_json::Value) -> std::result::Result<serde_json::Value, BoxedError> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(input)
    }
}

#[derive(Default)]
struct RecordingSink {
    events: TokioMutex<Vec<Event>>,
}

#[async_trait::async_trait]
impl EventSink for RecordingSink {
    async fn record(&self, event: Event) {
        self.events.lock().await.push(event);
    }
}

fn driver_with(tools: Vec<ToolSpec>) -> TurnDriver {
    let config = CoreConfig::builder().with_tools(tools).build().expect("valid config");
    TurnDriver::new(config).expect("valid executor construction")
}

#[tokio::test]
async fn executes_calls_and_registers_artefacts() {
    let driver = driver_with(vec![ToolSpec::new("mace", std::sync::Arc::new(MaceHandler))]);

    let token = CancellationToken::new();
    let results = driver
        .execute_tool_calls(
            "turn-1",
            &token,
            vec![PendingCall {
                name: "mace".to_string(),
                input: serde_json::json!({}),
            }],
        )
        .await;

    assert_eq!(results.len(), 1);
    assert!(!results[0].is_error());

    let reply = driver.render_reply("turn-1", "The formation energy is -3.45 eV/atom.").await;
    assert!(!reply.has_violations);
}

#[tokio::test]
async fn unregistered_material_property_is_flagged_by_render_gate() {
    let driver = driver_with(vec![ToolSpec::new("echo", std::sync::Arc::new(EchoHandler))]);
    let reply = driver.render_reply("turn-1", "The formation energy is -3.45 eV/atom.").await;
    assert!(reply.has_violations);
}

#[tokio::test]
async fn cancelling_the_turn_token_cancels_outstanding_calls() {
    let driver = driver_with(vec![ToolSpec::new("slow", std::sync::Arc::new(SlowHandler))]);

    let token = CancellationToken::new();
    let child = token.clone();
    let run = tokio::spawn(async move {
        driver
            .execute_tool_calls(
                "turn-1",
                &child,
                vec![PendingCall {
                    name: "slow".to_string(),
                    input: serde_json::json!({}),
                }],
            )
            .await
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    token.cancel();

    let results = tokio::time::timeout(Duration::from_millis(200), run)
        .await
        .expect("drain completes promptly after cancellation")
        .expect("task did not panic");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].error.as_deref(), Some("Cancelled"));
}

#[tokio::test]
async fn append_and_maybe_compact_reports_to_the_event_sink() {
    let sink = std::sync::Arc::new(RecordingSink::default());
    let config = CoreConfig::builder()
        .with_compaction(crystalyse_compaction::CompactionConfig {
            max_tokens: 10,
            threshold: 0.1,
            keep_recent: 1,
            summary_max_tokens: 50,
        })
        .with_event_sink(sink.clone())
        .build()
        .expect("valid config");
    let driver = TurnDriver::new(config).expect("valid executor construction");

    for i in 0..5 {
        driver
            .append_and_maybe_compact("turn-1", Message::user(format!("message number {i} with some padding text")))
            .await;
    }

    let events = sink.events.lock().await;
    assert!(events.iter().any(|event| matches!(event, Event::Compacted { .. })));
}
