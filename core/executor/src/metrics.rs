//! Tool execution metrics, for callers that want per-turn observability
//! beyond the [`tracing`] spans the executor itself emits.

use chrono::DateTime;
use chrono::Utc;

/// Metrics for a single tool execution.
#[derive(Debug, Clone)]
pub struct ToolMetrics {
    pub tool_name: String,
    pub tool_call_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub success: bool,
    pub parallel: bool,
    pub error: Option<String>,
}

impl ToolMetrics {
    pub fn start(tool_name: impl Into<String>, tool_call_id: impl Into<String>, parallel: bool) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_call_id: tool_call_id.into(),
            start_time: Utc::now(),
            end_time: None,
            success: false,
            parallel,
            error: None,
        }
    }

    pub fn duration_ms(&self) -> Option<f64> {
        self.end_time
            .map(|end| (end - self.start_time).num_microseconds().unwrap_or(0) as f64 / 1000.0)
    }

    pub fn complete(&mut self, success: bool, error: Option<String>) {
        self.end_time = Some(Utc::now());
        self.success = success;
        self.error = error;
    }
}

/// Aggregated metrics for a single agent turn.
#[derive(Debug, Clone)]
pub struct TurnMetrics {
    pub turn_id: String,
    pub start_time: DateTime<Utc>,
    pub tool_calls: Vec<ToolMetrics>,
}

impl TurnMetrics {
    pub fn new(turn_id: impl Into<String>) -> Self {
        Self {
            turn_id: turn_id.into(),
            start_time: Utc::now(),
            tool_calls: Vec::new(),
        }
    }

    pub fn add_tool(&mut self, metrics: ToolMetrics) {
        self.tool_calls.push(metrics);
    }

    pub fn parallel_count(&self) -> usize {
        self.tool_calls.iter().filter(|t| t.parallel).count()
    }

    pub fn serial_count(&self) -> usize {
        self.tool_calls.iter().filter(|t| !t.parallel).count()
    }

    pub fn success_count(&self) -> usize {
        self.tool_calls.iter().filter(|t| t.success).count()
    }

    pub fn total_duration_ms(&self) -> f64 {
        self.tool_calls.iter().filter_map(ToolMetrics::duration_ms).sum()
    }

    pub fn log_summary(&self) {
        tracing::info!(
            turn_id = %self.turn_id,
            tool_count = self.tool_calls.len(),
            parallel = self.parallel_count(),
            serial = self.serial_count(),
            succeeded = self.success_count(),
            total_duration_ms = self.total_duration_ms(),
            "turn complete",
        );
    }
}

#[cfg(test)]
#[path = "metrics.test.rs"]
mod tests;
