//! In-process permission checks against a [`SandboxPolicy`], for handlers
//! that touch the filesystem directly rather than through a spawned
//! subprocess.

use std::path::Path;

use crate::error::Result;
use crate::error::sandbox_error::*;
use crate::policy::SandboxLevel;
use crate::policy::SandboxPolicy;
use crate::policy::WritableRoot;

/// Checks filesystem and network access against a resolved policy.
#[derive(Debug, Clone)]
pub struct PermissionChecker {
    policy: SandboxPolicy,
    writable_roots: Vec<WritableRoot>,
}

impl PermissionChecker {
    /// Creates a checker with writable roots already resolved for `cwd`.
    pub fn new(policy: SandboxPolicy, cwd: &Path) -> Self {
        let writable_roots = policy.effective_writable_roots(cwd);
        Self {
            policy,
            writable_roots,
        }
    }

    pub fn policy(&self) -> &SandboxPolicy {
        &self.policy
    }

    /// Checks whether `path` is accessible, `write` indicating a write access.
    pub fn check_path(&self, path: &Path, write: bool) -> Result<()> {
        match self.policy.level {
            SandboxLevel::None => Ok(()),
            SandboxLevel::ReadOnly => {
                if write {
                    return WriteDeniedSnafu {
                        message: format!(
                            "sandbox is in read-only mode, cannot write to: {}",
                            path.display()
                        ),
                    }
                    .fail();
                }
                Ok(())
            }
            SandboxLevel::Workspace => {
                if !write {
                    return Ok(());
                }
                if self.is_protected_subpath(path) {
                    return PathDeniedSnafu {
                        path: path.display().to_string(),
                    }
                    .fail();
                }
                if !self.is_writable_path(path) {
                    return WriteDeniedSnafu {
                        message: format!("write outside writable roots: {}", path.display()),
                    }
                    .fail();
                }
                Ok(())
            }
        }
    }

    /// Checks whether network access is allowed.
    pub fn check_network(&self) -> Result<()> {
        if self.policy.level == SandboxLevel::None || self.policy.network_access {
            return Ok(());
        }
        NetworkDeniedSnafu.fail()
    }

    /// Returns true if `path` is under one of the writable roots and not
    /// under one of their protected subpaths.
    pub fn is_writable_path(&self, path: &Path) -> bool {
        if self.policy.level != SandboxLevel::Workspace {
            return self.policy.level == SandboxLevel::None;
        }
        self.writable_roots.iter().any(|root| path.starts_with(&root.path))
            && !self.is_protected_subpath(path)
    }

    fn is_protected_subpath(&self, path: &Path) -> bool {
        self.writable_roots
            .iter()
            .flat_map(|root| root.read_only_subpaths.iter())
            .any(|protected| path.starts_with(protected))
    }
}

#[cfg(test)]
#[path = "checker.test.rs"]
mod tests;
