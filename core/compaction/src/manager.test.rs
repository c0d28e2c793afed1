use crystalyse_error::BoxedError;

use super::*;

struct StubSummariser {
    reply: String,
}

#[async_trait::async_trait]
impl Summariser for StubSummariser {
    async fn summarise(&self, _prompt: &str) -> std::result::Result<String, BoxedError> {
        Ok(self.reply.clone())
    }
}

struct FailingSummariser;

#[async_trait::async_trait]
impl Summariser for FailingSummariser {
    async fn summarise(&self, _prompt: &str) -> std::result::Result<String, BoxedError> {
        Err(crystalyse_error::boxed(
            std::io::Error::other("rate limited"),
            crystalyse_error::StatusCode::External,
        ))
    }
}

fn transcript(n: usize) -> Vec<Message> {
    (0..n).map(|i| Message::user(format!("message {i}"))).collect()
}

#[test]
fn needs_compaction_respects_threshold() {
    let manager = ContextManager::new(CompactionConfig {
        max_tokens: 100,
        threshold: 0.5,
        keep_recent: 2,
        summary_max_tokens: 50,
    });
    assert!(!manager.needs_compaction(&transcript(1)));
    assert!(manager.needs_compaction(&transcript(20)));
}

#[tokio::test]
async fn compact_if_needed_is_a_no_op_below_threshold() {
    let manager = ContextManager::new(CompactionConfig::default());
    let result = manager.compact_if_needed(transcript(3)).await;
    assert!(!result.compacted);
    assert_eq!(result.final_count, 3);
}

#[tokio::test]
async fn compact_is_a_no_op_when_at_or_below_keep_recent() {
    let manager = ContextManager::new(CompactionConfig {
        keep_recent: 5,
        ..CompactionConfig::default()
    });
    let result = manager.compact(transcript(5)).await;
    assert!(!result.compacted);
}

#[tokio::test]
async fn compact_keeps_recent_messages_and_prepends_a_summary() {
    let manager = ContextManager::new(CompactionConfig {
        keep_recent: 2,
        ..CompactionConfig::default()
    })
    .with_summariser(Arc::new(StubSummariser {
        reply: "the investigation found a stable LiFePO4 phase".to_string(),
    }));

    let result = manager.compact(transcript(5)).await;

    assert!(result.compacted);
    assert_eq!(result.original_count, 5);
    assert_eq!(result.final_count, 3);
    assert_eq!(result.messages[0].role, "system");
    assert!(result.messages[0].content.contains("## Previous Context Summary"));
    assert_eq!(result.messages[0].metadata.get("compacted"), Some(&serde_json::Value::Bool(true)));
    assert_eq!(result.messages[1].content, "message 3");
    assert_eq!(result.messages[2].content, "message 4");
    assert_eq!(manager.compaction_count(), 1);
}

#[tokio::test]
async fn compact_falls_back_to_keyword_extraction_without_a_summariser() {
    let manager = ContextManager::new(CompactionConfig {
        keep_recent: 1,
        ..CompactionConfig::default()
    });
    let result = manager.compact(transcript(3)).await;
    assert!(result.summary.is_some());
}

#[tokio::test]
async fn compact_falls_back_to_keyword_extraction_when_summariser_fails() {
    let manager = ContextManager::new(CompactionConfig {
        keep_recent: 1,
        ..CompactionConfig::default()
    })
    .with_summariser(Arc::new(FailingSummariser));

    let result = manager.compact(transcript(3)).await;
    assert!(result.compacted);
    assert!(result.summary.is_some());
}
