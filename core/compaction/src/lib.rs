//! Context compaction: estimate the token cost of a transcript, decide when
//! it has grown too large, and collapse the oldest messages into a short
//! summary while keeping the most recent ones verbatim.

pub mod config;
pub mod error;
pub mod keywords;
pub mod manager;
pub mod message;
pub mod summary;

pub use config::CompactionConfig;
pub use error::CompactionError;
pub use error::Result;
pub use manager::ContextManager;
pub use manager::estimate_message_tokens;
pub use message::CompactionResult;
pub use message::Message;
pub use summary::COMPACTION_PROMPT;
pub use summary::Summariser;
