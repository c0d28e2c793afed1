//! Parallel tool execution: classify tool calls as read-only or mutating,
//! run the read-only ones concurrently, serialise the rest, and always
//! return results in the order they were queued.

pub mod classification;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod tool;

pub use classification::classify_tool;
pub use error::ExecutorError;
pub use error::Result;
pub use executor::DEFAULT_TIMEOUT;
pub use executor::ParallelToolExecutor;
pub use metrics::ToolMetrics;
pub use metrics::TurnMetrics;
pub use tool::ToolCall;
pub use tool::ToolHandler;
pub use tool::ToolResult;
pub use tool::ToolSpec;
