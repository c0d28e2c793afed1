//! Construction-time configuration for the turn driver.

use std::sync::Arc;
use std::time::Duration;

use crystalyse_compaction::CompactionConfig;
use crystalyse_compaction::Summariser;
use crystalyse_executor::ToolSpec;
use crystalyse_sandbox::SandboxPolicy;

use crate::error::InvalidConfigSnafu;
use crate::error::Result;
use crate::event::EventSink;

/// Every recognised construction-time option for a turn driver.
pub struct CoreConfig {
    pub tools: Vec<ToolSpec>,
    pub per_call_timeout: Duration,
    pub summariser: Option<Arc<dyn Summariser>>,
    pub compaction: CompactionConfig,
    pub sandbox: SandboxPolicy,
    pub event_sink: Option<Arc<dyn EventSink>>,
    /// When set, construction fails outright on a platform with no real
    /// sandbox backend instead of silently falling back to the no-op one.
    pub require_platform_sandbox: bool,
}

impl CoreConfig {
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }
}

/// Fluent builder for [`CoreConfig`]; `build` validates cross-field
/// invariants that a plain struct literal could not enforce.
#[derive(Default)]
pub struct CoreConfigBuilder {
    tools: Vec<ToolSpec>,
    per_call_timeout: Option<Duration>,
    summariser: Option<Arc<dyn Summariser>>,
    compaction: Option<CompactionConfig>,
    sandbox: Option<SandboxPolicy>,
    event_sink: Option<Arc<dyn EventSink>>,
    require_platform_sandbox: bool,
}

impl CoreConfigBuilder {
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_per_call_timeout(mut self, timeout: Duration) -> Self {
        self.per_call_timeout = Some(timeout);
        self
    }

    pub fn with_summariser(mut self, summariser: Arc<dyn Summariser>) -> Self {
        self.summariser = Some(summariser);
        self
    }

    pub fn with_compaction(mut self, compaction: CompactionConfig) -> Self {
        self.compaction = Some(compaction);
        self
    }

    pub fn with_sandbox(mut self, sandbox: SandboxPolicy) -> Self {
        self.sandbox = Some(sandbox);
        self
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(event_sink);
        self
    }

    pub fn require_platform_sandbox(mut self, required: bool) -> Self {
        self.require_platform_sandbox = required;
        self
    }

    pub fn build(self) -> Result<CoreConfig> {
        let compaction = self.compaction.unwrap_or_default();
        if !(0.0..=1.0).contains(&compaction.threshold) {
            return InvalidConfigSnafu {
                reason: format!("compaction.threshold must be within [0, 1], got {}", compaction.threshold),
            }
            .fail();
        }

        let platform = std::env::consts::OS;
        let has_real_backend = matches!(platform, "macos" | "linux");
        if self.require_platform_sandbox && !has_real_backend {
            return crate::error::PlatformUnsupportedSnafu {
                platform: platform.to_string(),
            }
            .fail();
        }

        Ok(CoreConfig {
            tools: self.tools,
            per_call_timeout: self.per_call_timeout.unwrap_or(crystalyse_executor::DEFAULT_TIMEOUT),
            summariser: self.summariser,
            compaction,
            sandbox: self.sandbox.unwrap_or_else(|| SandboxPolicy::read_only(true)),
            event_sink: self.event_sink,
            require_platform_sandbox: self.require_platform_sandbox,
        })
    }
}

#[cfg(test)]
#[path = "config.test.rs"]
mod tests;
