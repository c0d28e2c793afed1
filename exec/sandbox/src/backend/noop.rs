//! A backend that runs the command unmodified, for platforms without a
//! sandbox implementation.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::backend::SandboxBackend;
use crate::backend::run_plain;
use crate::policy::SandboxPolicy;
use crate::result::SandboxKind;
use crate::result::SandboxResult;

pub struct NoSandboxBackend;

#[async_trait::async_trait]
impl SandboxBackend for NoSandboxBackend {
    async fn execute(
        &self,
        cmd: &[String],
        cwd: &Path,
        _policy: &SandboxPolicy,
        timeout: Option<Duration>,
        env: Option<HashMap<String, String>>,
    ) -> SandboxResult {
        run_plain(cmd, cwd, timeout, env, SandboxKind::None).await
    }
}

#[cfg(test)]
#[path = "noop.test.rs"]
mod tests;
