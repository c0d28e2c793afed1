//! The turn driver: the glue between the parallel tool executor, the sandbox
//! policy, the provenance registry and render gate, and the context
//! compactor, assembled the way this codebase wires its execution core
//! together rather than as a framework with its own control flow.

pub mod config;
pub mod driver;
pub mod error;
pub mod event;

pub use config::CoreConfig;
pub use config::CoreConfigBuilder;
pub use driver::PendingCall;
pub use driver::RenderedReply;
pub use driver::TurnDriver;
pub use error::CoreError;
pub use error::Result;
pub use event::Event;
pub use event::EventSink;

/// Installs a `tracing_subscriber` global default subscriber from the
/// `RUST_LOG` environment variable, falling back to `info` when unset. Not
/// called automatically by any constructor in this crate; callers that want
/// it invoke it explicitly once at process startup.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
