//! Windows sandbox platform: not yet implemented. Always reports available
//! as false so callers fall back to the no-op backend.

use crate::error::Result;
use crate::platform::SandboxPlatform;
use crate::policy::SandboxPolicy;
use crate::policy::WritableRoot;

pub struct WindowsSandbox;

impl SandboxPlatform for WindowsSandbox {
    fn available(&self) -> bool {
        false
    }

    fn apply(&self, _policy: &SandboxPolicy, _writable_roots: &[WritableRoot]) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "windows.test.rs"]
mod tests;
