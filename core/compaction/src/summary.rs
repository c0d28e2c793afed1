//! Turning a run of old messages into a short summary, either via an
//! injected model-backed [`Summariser`] or a deterministic keyword fallback.

use crystalyse_error::BoxedError;
use crystalyse_string::contains_any_keyword;
use crystalyse_string::truncate_with_marker;

use crate::keywords::ERROR_KEYWORDS;
use crate::keywords::FINDING_KEYWORDS;
use crate::keywords::KEY_POINT_CAP;
use crate::keywords::KEY_POINT_LINE_LIMIT;
use crate::message::Message;

/// System content longer than this is truncated before being handed to a
/// summariser, so one verbose tool result can't blow the prompt budget.
const MAX_MESSAGE_CHARS_IN_SUMMARY: usize = 2000;

/// Instructions prefixed to the formatted transcript before it is handed to
/// a model-backed [`Summariser`].
pub const COMPACTION_PROMPT: &str = "Summarise the following conversation history concisely.\n\
\n\
Preserve:\n\
- Key findings with their sources/provenance\n\
- User constraints and preferences\n\
- Important decisions made\n\
- Errors encountered and how they were resolved\n\
- Material compositions and properties discussed\n\
\n\
Be concise but complete. Use bullet points for clarity.\n\
\n\
Conversation to summarise:\n";

/// Produces a compact summary of a run of messages, usually ahead of
/// compaction.
///
/// Implementations are expected to call out to a model; failures should be
/// surfaced so the caller can fall back to [`extract_key_points`].
#[async_trait::async_trait]
pub trait Summariser: Send + Sync {
    async fn summarise(&self, prompt: &str) -> Result<String, BoxedError>;
}

/// Renders `messages` as a role-tagged transcript suitable for prefixing with
/// [`COMPACTION_PROMPT`], truncating any single message's content past
/// [`MAX_MESSAGE_CHARS_IN_SUMMARY`].
pub fn format_messages_for_summary(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|message| {
            let content = truncate_with_marker(&message.content, MAX_MESSAGE_CHARS_IN_SUMMARY);
            match &message.name {
                Some(name) => format!("[{} ({name})]: {content}", message.role.to_uppercase()),
                None => format!("[{}]: {content}", message.role.to_uppercase()),
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Deterministic, keyword-based fallback used when no [`Summariser`] is
/// configured or the configured one fails.
pub fn extract_key_points(messages: &[Message]) -> String {
    let mut points = Vec::new();

    for message in messages {
        if points.len() >= KEY_POINT_CAP {
            points.push("... (additional points truncated)".to_string());
            break;
        }

        let first_line = message.content.lines().next().unwrap_or_default();

        if contains_any_keyword(&message.content, FINDING_KEYWORDS) && first_line.len() < KEY_POINT_LINE_LIMIT {
            points.push(format!("- {}: {first_line}", message.role));
        }
        if message.role == "user" && message.content.len() < KEY_POINT_LINE_LIMIT {
            points.push(format!("- User request: {}", message.content));
        }
        if contains_any_keyword(&message.content, ERROR_KEYWORDS) {
            points.push(format!("- Issue: {first_line}"));
        }
    }

    if points.is_empty() {
        format!("Previous conversation contained {} messages.", messages.len())
    } else {
        points.join("\n")
    }
}

#[cfg(test)]
#[path = "summary.test.rs"]
mod tests;
