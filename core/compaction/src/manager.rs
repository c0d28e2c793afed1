//! Decides when a transcript has grown too large and rewrites it into a
//! short summary plus the most recent messages.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use crystalyse_error::ErrorExt;
use crystalyse_string::estimate_tokens;

use crate::config::CompactionConfig;
use crate::error::SummariserFailedSnafu;
use crate::message::CompactionResult;
use crate::message::Message;
use crate::summary::COMPACTION_PROMPT;
use crate::summary::Summariser;
use crate::summary::extract_key_points;
use crate::summary::format_messages_for_summary;

/// Per-message overhead, in estimated tokens, added on top of content and
/// name to account for role/formatting tokens a real chat-completion
/// tokenizer would charge for.
const MESSAGE_OVERHEAD_TOKENS: usize = 4;

/// Estimates the total token cost of `messages` under the same crude
/// heuristic used to decide whether compaction is needed.
pub fn estimate_message_tokens(messages: &[Message]) -> usize {
    messages
        .iter()
        .map(|message| {
            let mut tokens = estimate_tokens(&message.content) + MESSAGE_OVERHEAD_TOKENS;
            if let Some(name) = &message.name {
                tokens += estimate_tokens(name);
            }
            tokens
        })
        .sum()
}

/// Compacts a transcript once it crosses a configured token threshold,
/// replacing the oldest messages with a short summary while always keeping
/// the most recent ones verbatim.
pub struct ContextManager {
    config: CompactionConfig,
    summariser: Option<Arc<dyn Summariser>>,
    compaction_count: AtomicUsize,
}

impl ContextManager {
    pub fn new(config: CompactionConfig) -> Self {
        Self {
            config,
            summariser: None,
            compaction_count: AtomicUsize::new(0),
        }
    }

    pub fn with_summariser(mut self, summariser: Arc<dyn Summariser>) -> Self {
        self.summariser = Some(summariser);
        self
    }

    pub fn compaction_count(&self) -> usize {
        self.compaction_count.load(Ordering::Relaxed)
    }

    /// Whether `messages` has crossed `config.threshold` of `config.max_tokens`.
    pub fn needs_compaction(&self, messages: &[Message]) -> bool {
        estimate_message_tokens(messages) >= self.config.trigger_tokens()
    }

    /// Compacts `messages` only if [`Self::needs_compaction`] reports true;
    /// otherwise returns them unchanged.
    pub async fn compact_if_needed(&self, messages: Vec<Message>) -> CompactionResult {
        if self.needs_compaction(&messages) {
            self.compact(messages).await
        } else {
            CompactionResult::unchanged(messages)
        }
    }

    /// Summarises every message except the most recent `config.keep_recent`
    /// into a single leading system message. A no-op if there are not more
    /// messages than `config.keep_recent`.
    ///
    /// Never fails: a configured [`Summariser`] that errors is logged and
    /// the deterministic [`extract_key_points`] fallback is used instead.
    pub async fn compact(&self, messages: Vec<Message>) -> CompactionResult {
        let original_count = messages.len();
        if original_count <= self.config.keep_recent {
            return CompactionResult::unchanged(messages);
        }

        let split_at = original_count - self.config.keep_recent;
        let (old, recent) = messages.split_at(split_at);
        let old = old.to_vec();
        let recent = recent.to_vec();

        let summary = self.generate_summary(&old).await;

        let summary_message = Message::system(format!("## Previous Context Summary\n\n{summary}"))
            .with_metadata("compacted", serde_json::Value::Bool(true))
            .with_metadata("original_count", serde_json::Value::from(old.len()));

        let mut final_messages = Vec::with_capacity(recent.len() + 1);
        final_messages.push(summary_message);
        final_messages.extend(recent);

        self.compaction_count.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            original_count,
            final_count = final_messages.len(),
            "compacted conversation history"
        );

        CompactionResult {
            final_count: final_messages.len(),
            messages: final_messages,
            summary: Some(summary),
            original_count,
            compacted: true,
        }
    }

    /// Falls back to [`extract_key_points`] whenever no summariser is
    /// configured, or the configured one errors.
    async fn generate_summary(&self, old_messages: &[Message]) -> String {
        let Some(summariser) = &self.summariser else {
            return extract_key_points(old_messages);
        };
        let prompt = format!("{COMPACTION_PROMPT}{}", format_messages_for_summary(old_messages));
        match summariser.summarise(&prompt).await {
            Ok(summary) => summary,
            Err(error) => {
                let error = SummariserFailedSnafu {
                    message: error.to_string(),
                }
                .build();
                tracing::error!(error = %error, status = %error.status_code(), "summariser failed, falling back to key-point extraction");
                extract_key_points(old_messages)
            }
        }
    }
}

#[cfg(test)]
#[path = "manager.test.rs"]
mod tests;
