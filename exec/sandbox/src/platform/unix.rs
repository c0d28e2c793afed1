//! Unix sandbox platform: Landlock self-restriction on Linux, a no-op on
//! macOS (where confinement is applied externally via `sandbox-exec`).

use crate::error::Result;
use crate::platform::SandboxPlatform;
use crate::policy::SandboxPolicy;
use crate::policy::WritableRoot;

pub struct UnixSandbox;

impl SandboxPlatform for UnixSandbox {
    fn available(&self) -> bool {
        cfg!(target_os = "macos") || cfg!(target_os = "linux")
    }

    fn apply(&self, policy: &SandboxPolicy, writable_roots: &[WritableRoot]) -> Result<()> {
        #[cfg(target_os = "linux")]
        {
            linux::restrict_self(policy, writable_roots);
        }
        #[cfg(not(target_os = "linux"))]
        {
            let _ = (policy, writable_roots);
        }
        Ok(())
    }
}

/// Raw Landlock syscall glue.
///
/// Landlock ABI v1: https://docs.kernel.org/userspace-api/landlock.html.
/// The crate this workspace otherwise depends on for Linux-only syscall
/// filtering (`seccompiler`) does not cover Landlock, so this talks to the
/// kernel directly through the three dedicated syscalls. Any failure here
/// (old kernel, ruleset rejected) falls through to an unconfined exec rather
/// than aborting the command — a sandbox that can't be applied should not
/// turn into a denial-of-service for every tool call.
#[cfg(target_os = "linux")]
mod linux {
    use std::ffi::CString;
    use std::os::raw::c_int;
    use std::os::raw::c_long;
    use std::os::unix::ffi::OsStrExt;

    use crate::policy::SandboxPolicy;
    use crate::policy::WritableRoot;

    const SYS_LANDLOCK_CREATE_RULESET: c_long = 444;
    const SYS_LANDLOCK_ADD_RULE: c_long = 445;
    const SYS_LANDLOCK_RESTRICT_SELF: c_long = 446;
    const LANDLOCK_RULE_PATH_BENEATH: c_int = 1;

    const ACCESS_FS_EXECUTE: u64 = 1 << 0;
    const ACCESS_FS_WRITE_FILE: u64 = 1 << 1;
    const ACCESS_FS_READ_FILE: u64 = 1 << 2;
    const ACCESS_FS_READ_DIR: u64 = 1 << 3;
    const ACCESS_FS_REMOVE_DIR: u64 = 1 << 4;
    const ACCESS_FS_REMOVE_FILE: u64 = 1 << 5;
    const ACCESS_FS_MAKE_CHAR: u64 = 1 << 6;
    const ACCESS_FS_MAKE_DIR: u64 = 1 << 7;
    const ACCESS_FS_MAKE_REG: u64 = 1 << 8;
    const ACCESS_FS_MAKE_SOCK: u64 = 1 << 9;
    const ACCESS_FS_MAKE_FIFO: u64 = 1 << 10;
    const ACCESS_FS_MAKE_BLOCK: u64 = 1 << 11;
    const ACCESS_FS_MAKE_SYM: u64 = 1 << 12;

    const ACCESS_FS_ALL: u64 = ACCESS_FS_EXECUTE
        | ACCESS_FS_WRITE_FILE
        | ACCESS_FS_READ_FILE
        | ACCESS_FS_READ_DIR
        | ACCESS_FS_REMOVE_DIR
        | ACCESS_FS_REMOVE_FILE
        | ACCESS_FS_MAKE_CHAR
        | ACCESS_FS_MAKE_DIR
        | ACCESS_FS_MAKE_REG
        | ACCESS_FS_MAKE_SOCK
        | ACCESS_FS_MAKE_FIFO
        | ACCESS_FS_MAKE_BLOCK
        | ACCESS_FS_MAKE_SYM;

    const ACCESS_FS_READ_ONLY: u64 = ACCESS_FS_READ_FILE | ACCESS_FS_READ_DIR | ACCESS_FS_EXECUTE;

    #[repr(C)]
    struct RulesetAttr {
        handled_access_fs: u64,
    }

    #[repr(C)]
    struct PathBeneathAttr {
        allowed_access: u64,
        parent_fd: c_int,
    }

    /// Restricts the current process to read-everywhere plus write-only
    /// inside `writable_roots`. Never panics; on any failure it logs and
    /// leaves the process unconfined so the exec still proceeds.
    pub fn restrict_self(policy: &SandboxPolicy, writable_roots: &[WritableRoot]) {
        if policy.level.is_unconfined() {
            return;
        }

        // SAFETY: straight syscall with a stack-local, correctly sized attr struct,
        // per landlock_create_ruleset(2).
        let ruleset_attr = RulesetAttr {
            handled_access_fs: ACCESS_FS_ALL,
        };
        let ruleset_fd = unsafe {
            libc::syscall(
                SYS_LANDLOCK_CREATE_RULESET,
                &ruleset_attr as *const RulesetAttr,
                std::mem::size_of::<RulesetAttr>(),
                0u32,
            )
        };
        if ruleset_fd < 0 {
            tracing::warn!("landlock_create_ruleset failed, running unconfined");
            return;
        }
        let ruleset_fd = ruleset_fd as c_int;

        if !add_rule(ruleset_fd, "/", ACCESS_FS_READ_ONLY) {
            tracing::warn!("landlock: failed to allow read access to /");
        }
        if !add_rule(ruleset_fd, "/dev/null", ACCESS_FS_ALL) {
            tracing::warn!("landlock: failed to allow full access to /dev/null");
        }
        if policy.level.allows_write() {
            for root in writable_roots {
                let access = ACCESS_FS_ALL;
                if let Some(path) = root.path.to_str()
                    && !add_rule(ruleset_fd, path, access)
                {
                    tracing::warn!(path, "landlock: failed to add writable-root rule");
                }
            }
        }

        // SAFETY: PR_SET_NO_NEW_PRIVS is a documented, argument-free prctl option.
        let no_new_privs = unsafe { libc::prctl(libc::PR_SET_NO_NEW_PRIVS, 1, 0, 0, 0) };
        if no_new_privs != 0 {
            tracing::warn!("prctl(PR_SET_NO_NEW_PRIVS) failed, running unconfined");
            unsafe { libc::close(ruleset_fd) };
            return;
        }

        // SAFETY: ruleset_fd is a valid fd returned above; flags must be 0 per the syscall ABI.
        let restricted = unsafe { libc::syscall(SYS_LANDLOCK_RESTRICT_SELF, ruleset_fd, 0u32) };
        unsafe { libc::close(ruleset_fd) };
        if restricted != 0 {
            tracing::warn!("landlock_restrict_self failed, running unconfined");
        }
    }

    fn add_rule(ruleset_fd: c_int, path: impl AsRef<std::path::Path>, allowed_access: u64) -> bool {
        let Ok(c_path) = CString::new(path.as_ref().as_os_str().as_bytes()) else {
            return false;
        };
        // SAFETY: O_PATH|O_CLOEXEC on a path we own the lifetime of; fd is closed below.
        let parent_fd = unsafe { libc::open(c_path.as_ptr(), libc::O_PATH | libc::O_CLOEXEC) };
        if parent_fd < 0 {
            return false;
        }
        let rule_attr = PathBeneathAttr {
            allowed_access,
            parent_fd,
        };
        // SAFETY: rule_attr is a correctly sized, stack-local attr struct per landlock_add_rule(2).
        let result = unsafe {
            libc::syscall(
                SYS_LANDLOCK_ADD_RULE,
                ruleset_fd,
                LANDLOCK_RULE_PATH_BENEATH,
                &rule_attr as *const PathBeneathAttr,
                0u32,
            )
        };
        unsafe { libc::close(parent_fd) };
        result == 0
    }
}

#[cfg(test)]
#[path = "unix.test.rs"]
mod tests;
