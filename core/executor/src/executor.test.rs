use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use crystalyse_async_utils::CancellationToken;

use super::*;
use crate::tool::ToolHandler;

struct EchoHandler;

#[async_trait::async_trait]
impl ToolHandler for EchoHandler {
    async fn call(&self, input: serde_json::Value) -> Result<serde_json::Value, crystalyse_error::BoxedError> {
        Ok(input)
    }
}

struct SlowHandler {
    delay: Duration,
}

#[async_trait::async_trait]
impl ToolHandler for SlowHandler {
    async fn call(&self, input: serde_json::Value) -> Result<serde_json::Value, crystalyse_error::BoxedError> {
        tokio::time::sleep(self.delay).await;
        Ok(input)
    }
}

struct FailingHandler;

#[async_trait::async_trait]
impl ToolHandler for FailingHandler {
    async fn call(&self, _input: serde_json::Value) -> Result<serde_json::Value, crystalyse_error::BoxedError> {
        Err(crystalyse_error::boxed(
            std::io::Error::other("boom"),
            crystalyse_error::StatusCode::Internal,
        ))
    }
}

struct CountingHandler {
    concurrent: Arc<AtomicUsize>,
    max_seen: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl ToolHandler for CountingHandler {
    async fn call(&self, input: serde_json::Value) -> Result<serde_json::Value, crystalyse_error::BoxedError> {
        let now = self.concurrent.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_seen.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.concurrent.fetch_sub(1, Ordering::SeqCst);
        Ok(input)
    }
}

fn call(id: &str, name: &str) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        input: serde_json::json!({}),
    }
}

#[tokio::test]
async fn unknown_tool_reports_error_without_panicking() {
    let executor = ParallelToolExecutor::new(Vec::new()).expect("no duplicate tools");
    let token = CancellationToken::new();
    executor.queue(call("1", "nonexistent"), token).await;
    let results = executor.drain().await;
    assert_eq!(results.len(), 1);
    assert!(results[0].is_error());
}

#[tokio::test]
async fn results_preserve_call_order_despite_uneven_latency() {
    let tools = vec![
        ToolSpec::new("read_file", Arc::new(SlowHandler { delay: Duration::from_millis(50) })),
        ToolSpec::new("web_search", Arc::new(EchoHandler)),
    ];
    let executor = ParallelToolExecutor::new(tools).expect("no duplicate tools");
    let token = CancellationToken::new();

    executor.queue(call("1", "read_file"), token.clone()).await;
    executor.queue(call("2", "web_search"), token).await;

    let results = executor.drain().await;
    assert_eq!(results[0].tool_call_id, "1");
    assert_eq!(results[1].tool_call_id, "2");
}

#[tokio::test]
async fn parallel_tools_run_concurrently() {
    let concurrent = Arc::new(AtomicUsize::new(0));
    let max_seen = Arc::new(AtomicUsize::new(0));
    let handler = Arc::new(CountingHandler {
        concurrent: Arc::clone(&concurrent),
        max_seen: Arc::clone(&max_seen),
    });
    let tools = vec![ToolSpec::new("read_file", handler)];
    let executor = ParallelToolExecutor::new(tools).expect("no duplicate tools");
    let token = CancellationToken::new();

    for i in 0..5 {
        executor.queue(call(&i.to_string(), "read_file"), token.clone()).await;
    }
    executor.drain().await;

    assert!(max_seen.load(Ordering::SeqCst) > 1);
}

#[tokio::test]
async fn serial_tools_never_overlap() {
    let concurrent = Arc::new(AtomicUsize::new(0));
    let max_seen = Arc::new(AtomicUsize::new(0));
    let handler = Arc::new(CountingHandler {
        concurrent: Arc::clone(&concurrent),
        max_seen: Arc::clone(&max_seen),
    });
    let tools = vec![ToolSpec::new("write_file", handler)];
    let executor = ParallelToolExecutor::new(tools).expect("no duplicate tools");
    let token = CancellationToken::new();

    for i in 0..5 {
        executor.queue(call(&i.to_string(), "write_file"), token.clone()).await;
    }
    executor.drain().await;

    assert_eq!(max_seen.load(Ordering::SeqCst), 1);
}

struct EventHandler {
    name: &'static str,
    delay: Duration,
    events: Arc<std::sync::Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl ToolHandler for EventHandler {
    async fn call(&self, input: serde_json::Value) -> Result<serde_json::Value, crystalyse_error::BoxedError> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).push(format!("{}:start", self.name));
        tokio::time::sleep(self.delay).await;
        self.events.lock().unwrap_or_else(|e| e.into_inner()).push(format!("{}:end", self.name));
        Ok(input)
    }
}

#[tokio::test]
async fn queued_write_excludes_a_later_read_until_it_completes() {
    let events = Arc::new(std::sync::Mutex::new(Vec::new()));
    let tools = vec![
        ToolSpec::new(
            "read_file",
            Arc::new(EventHandler {
                name: "read",
                delay: Duration::from_millis(60),
                events: Arc::clone(&events),
            }),
        ),
        ToolSpec::new(
            "write_file",
            Arc::new(EventHandler {
                name: "write",
                delay: Duration::from_millis(60),
                events: Arc::clone(&events),
            }),
        ),
    ];
    let executor = ParallelToolExecutor::new(tools).expect("no duplicate tools");
    let token = CancellationToken::new();

    // R1: queued first, holds the read lock open for 60ms.
    executor.queue(call("1", "read_file"), token.clone()).await;
    tokio::time::sleep(Duration::from_millis(15)).await;
    // W1: queued while R1 is still in flight, so it must wait for R1.
    executor.queue(call("2", "write_file"), token.clone()).await;
    tokio::time::sleep(Duration::from_millis(15)).await;
    // R2: queued after W1 is already waiting; it must not begin before W1 ends.
    executor.queue(call("3", "read_file"), token).await;

    executor.drain().await;

    let events = events.lock().unwrap_or_else(|e| e.into_inner()).clone();
    let write_end = events.iter().position(|e| e == "write:end").expect("write completed");
    let second_read_start = events.iter().rposition(|e| e == "read:start").expect("second read started");
    assert!(second_read_start > write_end, "events: {events:?}");
}

#[tokio::test]
async fn handler_failure_is_reported_as_tool_result_error() {
    let tools = vec![ToolSpec::new("write_file", Arc::new(FailingHandler))];
    let executor = ParallelToolExecutor::new(tools).expect("no duplicate tools");
    let token = CancellationToken::new();
    executor.queue(call("1", "write_file"), token).await;
    let results = executor.drain().await;
    assert!(results[0].is_error());
}

#[tokio::test]
async fn pre_cancelled_token_short_circuits_queued_call() {
    let tools = vec![ToolSpec::new("read_file", Arc::new(EchoHandler))];
    let executor = ParallelToolExecutor::new(tools).expect("no duplicate tools");
    let token = CancellationToken::new();
    token.cancel();
    executor.queue(call("1", "read_file"), token).await;
    let results = executor.drain().await;
    assert_eq!(results[0].error.as_deref(), Some("Cancelled"));
}

#[tokio::test]
async fn call_exceeding_timeout_is_reported_as_timeout_error() {
    let tools = vec![ToolSpec::new("slow", Arc::new(SlowHandler { delay: Duration::from_millis(200) }))];
    let executor = ParallelToolExecutor::with_timeout(tools, Duration::from_millis(10)).expect("no duplicate tools");
    let token = CancellationToken::new();
    executor.queue(call("1", "slow"), token).await;
    let results = executor.drain().await;
    assert!(results[0].error.as_deref().unwrap_or_default().contains("timed out"));
}

#[tokio::test]
async fn drain_with_nothing_queued_returns_empty() {
    let executor = ParallelToolExecutor::new(Vec::new()).expect("no duplicate tools");
    assert_eq!(executor.drain().await.len(), 0);
}
