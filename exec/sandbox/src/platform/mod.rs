//! Platform-specific in-process sandbox application.
//!
//! This is the low-level building block used by the Linux backend to
//! self-restrict a forked child immediately before `execvp`. The macOS and
//! Windows backends instead wrap the command with an external enforcement
//! mechanism (`sandbox-exec`, Job Objects) and so treat `apply` as a no-op.

use crate::error::Result;
use crate::policy::SandboxPolicy;
use crate::policy::WritableRoot;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

/// Platform-specific sandbox enforcement applied to the *current* process.
pub trait SandboxPlatform: Send + Sync {
    /// Returns true if this sandbox implementation is available on the current OS.
    fn available(&self) -> bool;

    /// Restricts the current process per `policy`/`writable_roots`. Must be
    /// called from a child immediately before exec'ing the target command;
    /// the restriction is permanent for the lifetime of the process.
    fn apply(&self, policy: &SandboxPolicy, writable_roots: &[WritableRoot]) -> Result<()>;
}

/// Returns the platform-appropriate sandbox implementation.
#[cfg(unix)]
pub fn platform_sandbox() -> unix::UnixSandbox {
    unix::UnixSandbox
}

/// Returns the platform-appropriate sandbox implementation.
#[cfg(windows)]
pub fn platform_sandbox() -> windows::WindowsSandbox {
    windows::WindowsSandbox
}

#[cfg(test)]
#[path = "mod.test.rs"]
mod tests;
