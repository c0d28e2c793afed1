//! Declarative sandbox policy: confinement level plus the writable-root
//! computation shared by every backend.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// Sandbox confinement level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SandboxLevel {
    /// No enforcement; reads, writes and network are all allowed.
    None,
    /// Reads allowed anywhere; writes are redirected to fail (`/dev/null`-style).
    #[default]
    ReadOnly,
    /// Reads allowed anywhere; writes allowed only inside the writable roots.
    Workspace,
}

impl SandboxLevel {
    pub fn allows_write(&self) -> bool {
        !matches!(self, Self::ReadOnly)
    }

    pub fn is_unconfined(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A root directory that is writable under [`SandboxLevel::Workspace`], with
/// any auto-detected protected sub-paths carved back out as read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritableRoot {
    pub path: PathBuf,
    pub read_only_subpaths: Vec<PathBuf>,
}

impl WritableRoot {
    /// Builds a writable root from `path`, auto-detecting version-control
    /// metadata and this tool's own config directory as protected subpaths.
    ///
    /// Mirrors the original prototype: `.git` may be a directory (normal
    /// checkout) or a file containing `gitdir: <path>` (worktree), in which
    /// case the real metadata directory is protected instead of the pointer
    /// file itself.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut read_only_subpaths = Vec::new();

        let git_path = path.join(".git");
        if git_path.is_dir() {
            read_only_subpaths.push(git_path);
        } else if git_path.is_file()
            && let Some(real) = parse_gitdir_pointer(&git_path)
        {
            read_only_subpaths.push(real);
        }

        let config_dir = path.join(".crystalyse");
        if config_dir.exists() {
            read_only_subpaths.push(config_dir);
        }

        Self {
            path,
            read_only_subpaths,
        }
    }
}

fn parse_gitdir_pointer(pointer_file: &Path) -> Option<PathBuf> {
    let contents = fs::read_to_string(pointer_file).ok()?;
    let line = contents.lines().next()?;
    let rest = line.strip_prefix("gitdir:")?;
    Some(PathBuf::from(rest.trim()))
}

/// The full declarative policy passed to a sandbox backend.
#[derive(Debug, Clone)]
pub struct SandboxPolicy {
    pub level: SandboxLevel,
    pub writable_roots: Vec<WritableRoot>,
    pub network_access: bool,
    pub include_tmp: bool,
    pub include_tmpdir: bool,
}

impl SandboxPolicy {
    pub fn none() -> Self {
        Self {
            level: SandboxLevel::None,
            writable_roots: Vec::new(),
            network_access: true,
            include_tmp: false,
            include_tmpdir: false,
        }
    }

    pub fn read_only(network_access: bool) -> Self {
        Self {
            level: SandboxLevel::ReadOnly,
            writable_roots: Vec::new(),
            network_access,
            include_tmp: false,
            include_tmpdir: false,
        }
    }

    pub fn workspace(writable_roots: Vec<WritableRoot>, network_access: bool) -> Self {
        Self {
            level: SandboxLevel::Workspace,
            writable_roots,
            network_access,
            include_tmp: true,
            include_tmpdir: true,
        }
    }

    /// Computes the effective writable roots for a command about to run in
    /// `cwd`: the policy's own roots, plus `cwd`, plus temp directories if
    /// enabled, de-duplicated by canonical path.
    pub fn effective_writable_roots(&self, cwd: &Path) -> Vec<WritableRoot> {
        if self.level != SandboxLevel::Workspace {
            return Vec::new();
        }

        let mut roots = self.writable_roots.clone();
        roots.push(WritableRoot::from_path(cwd));

        if self.include_tmpdir
            && let Ok(tmpdir) = std::env::var("TMPDIR")
        {
            roots.push(WritableRoot::from_path(tmpdir));
        }
        if self.include_tmp {
            roots.push(WritableRoot::from_path("/tmp"));
        }

        let mut seen = std::collections::HashSet::new();
        roots.retain(|root| {
            let canonical = fs::canonicalize(&root.path).unwrap_or_else(|_| root.path.clone());
            seen.insert(canonical)
        });
        roots
    }
}

#[cfg(test)]
#[path = "policy.test.rs"]
mod tests;
