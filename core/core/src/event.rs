//! Observability hook: the turn driver reports per-call and per-turn
//! records to an injected sink rather than hold any event state itself.

use crystalyse_executor::TurnMetrics;

/// One record of something the turn driver did, for a caller that wants to
/// persist them (e.g. as `events.jsonl`) beyond the `tracing` spans already
/// emitted at each stage.
#[derive(Debug, Clone)]
pub enum Event {
    Turn(TurnMetrics),
    ArtefactRegistered { turn_id: String, artifact_id: String, extracted_values: usize },
    Compacted { turn_id: String, original_count: usize, final_count: usize },
    RenderGateViolation { turn_id: String, flagged_count: usize },
}

/// Receives [`Event`]s as the turn driver produces them.
#[async_trait::async_trait]
pub trait EventSink: Send + Sync {
    async fn record(&self, event: Event);
}
