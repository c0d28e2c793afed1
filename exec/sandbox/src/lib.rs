//! Sandboxed command execution: a declarative [`policy::SandboxPolicy`]
//! enforced either by a platform-specific [`backend::SandboxBackend`] around
//! a spawned subprocess, or in-process via [`checker::PermissionChecker`] for
//! handlers that touch the filesystem directly.

pub mod backend;
pub mod checker;
pub mod detection;
pub mod error;
pub mod platform;
pub mod policy;
pub mod result;

pub use backend::SandboxBackend;
pub use backend::get_backend;
pub use checker::PermissionChecker;
pub use detection::get_denial_reason;
pub use detection::is_sandbox_denied;
pub use error::Result;
pub use error::SandboxError;
pub use policy::SandboxLevel;
pub use policy::SandboxPolicy;
pub use policy::WritableRoot;
pub use result::SandboxKind;
pub use result::SandboxResult;
