//! Tunables controlling when and how a transcript is compacted.

use serde::Deserialize;
use serde::Serialize;

/// Thresholds and limits for [`crate::manager::ContextManager`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactionConfig {
    /// Budget the transcript is expected to stay under, in estimated tokens.
    pub max_tokens: usize,
    /// Fraction of `max_tokens` that triggers compaction once crossed.
    pub threshold: f64,
    /// Number of most recent messages always kept verbatim.
    pub keep_recent: usize,
    /// Target length, in estimated tokens, of a generated summary.
    pub summary_max_tokens: usize,
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            max_tokens: 100_000,
            threshold: 0.8,
            keep_recent: 10,
            summary_max_tokens: 2000,
        }
    }
}

impl CompactionConfig {
    /// The token count at which [`crate::manager::ContextManager::needs_compaction`]
    /// starts reporting `true`.
    pub fn trigger_tokens(&self) -> usize {
        (self.max_tokens as f64 * self.threshold) as usize
    }
}

#[cfg(test)]
#[path = "config.test.rs"]
mod tests;
