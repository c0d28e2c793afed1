//! macOS sandbox backend: wraps the command with `sandbox-exec` under a
//! dynamically generated Seatbelt profile (SBPL).

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::backend::SandboxBackend;
use crate::backend::apply_sandbox_env;
use crate::backend::run;
use crate::policy::SandboxLevel;
use crate::policy::SandboxPolicy;
use crate::policy::WritableRoot;
use crate::result::SandboxKind;
use crate::result::SandboxResult;

/// Hardcoded to defend against `PATH` injection.
const SANDBOX_EXEC_PATH: &str = "/usr/bin/sandbox-exec";

/// Deny-by-default base policy, allowing the process/IO plumbing every
/// command needs regardless of confinement level.
const SEATBELT_BASE_POLICY: &str = r#"(version 1)

; start with closed-by-default
(deny default)

; child processes inherit the policy of their parent
(allow process-exec)
(allow process-fork)
(allow signal (target same-sandbox))

(allow user-preference-read)
(allow process-info* (target same-sandbox))

(allow file-write-data
  (require-all
    (path "/dev/null")
    (vnode-type CHARACTER-DEVICE)))

(allow sysctl-read
  (sysctl-name "hw.activecpu")
  (sysctl-name "hw.byteorder")
  (sysctl-name "hw.cpufamily")
  (sysctl-name "hw.cputype")
  (sysctl-name "hw.logicalcpu_max")
  (sysctl-name "hw.machine")
  (sysctl-name "hw.memsize")
  (sysctl-name "hw.ncpu")
  (sysctl-name "hw.pagesize")
  (sysctl-name "hw.physicalcpu")
  (sysctl-name "kern.hostname")
  (sysctl-name "kern.osproductversion")
  (sysctl-name "kern.osrelease")
  (sysctl-name "kern.ostype")
  (sysctl-name "kern.osversion")
  (sysctl-name "kern.version")
  (sysctl-name "vm.loadavg")
  (sysctl-name-prefix "kern.proc.pgrp.")
  (sysctl-name-prefix "kern.proc.pid.")
)

(allow iokit-open
  (iokit-registry-entry-class "RootDomainUserClient"))

(allow mach-lookup
  (global-name "com.apple.system.opendirectoryd.libinfo"))

(allow ipc-posix-sem)

(allow mach-lookup
  (global-name "com.apple.PowerManagement.control"))

(allow pseudo-tty)
(allow file-read* file-write* file-ioctl (literal "/dev/ptmx"))
(allow file-read* file-write*
  (require-all
    (regex #"^/dev/ttys[0-9]+")
    (extension "com.apple.sandbox.pty")))
(allow file-ioctl (regex #"^/dev/ttys[0-9]+"))
"#;

/// Addon allowing outbound/inbound network plus the lookups macOS needs to
/// resolve DNS and certificates while doing so.
const SEATBELT_NETWORK_POLICY: &str = r#"(allow network-outbound)
(allow network-inbound)
(allow system-socket)

(allow mach-lookup
    (global-name "com.apple.bsd.dirhelper")
    (global-name "com.apple.system.opendirectoryd.membership")
    (global-name "com.apple.SecurityServer")
    (global-name "com.apple.networkd")
    (global-name "com.apple.ocspd")
    (global-name "com.apple.trustd.agent")
    (global-name "com.apple.SystemConfiguration.DNSConfiguration")
    (global-name "com.apple.SystemConfiguration.configd")
)

(allow sysctl-read
  (sysctl-name-regex #"^net.routetable")
)

(allow file-write*
  (subpath (param "DARWIN_USER_CACHE_DIR"))
)
"#;

pub struct SeatbeltBackend;

#[async_trait::async_trait]
impl SandboxBackend for SeatbeltBackend {
    async fn execute(
        &self,
        cmd: &[String],
        cwd: &Path,
        policy: &SandboxPolicy,
        timeout: Option<Duration>,
        env: Option<HashMap<String, String>>,
    ) -> SandboxResult {
        if cmd.is_empty() {
            return SandboxResult {
                stdout: String::new(),
                stderr: "empty command".to_string(),
                exit_code: 127,
                sandbox_kind: SandboxKind::Seatbelt,
                sandbox_denied: false,
                denial_reason: None,
            };
        }

        let full_command = transform_command(cmd, policy, cwd);
        let Some((program, args)) = full_command.split_first() else {
            unreachable!("transform_command always prepends sandbox-exec");
        };

        let mut command = tokio::process::Command::new(program);
        command.args(args).current_dir(cwd);
        apply_sandbox_env(&mut command, SandboxKind::Seatbelt, !policy.network_access);
        if let Some(env) = env {
            command.envs(env);
        }

        run(command, timeout, SandboxKind::Seatbelt).await
    }
}

/// Wraps `cmd` with `sandbox-exec -p <policy> -D<key>=<value>... -- <cmd>`.
fn transform_command(cmd: &[String], policy: &SandboxPolicy, cwd: &Path) -> Vec<String> {
    let (sbpl_policy, params) = create_seatbelt_policy(policy, cwd);

    let mut args = vec![SANDBOX_EXEC_PATH.to_string(), "-p".to_string(), sbpl_policy];
    for (key, value) in params {
        args.push(format!("-D{key}={value}"));
    }
    args.push("--".to_string());
    args.extend(cmd.iter().cloned());
    args
}

/// Builds the full SBPL policy text plus its `-D` parameter bindings.
fn create_seatbelt_policy(policy: &SandboxPolicy, cwd: &Path) -> (String, Vec<(String, String)>) {
    let mut params = Vec::new();

    let file_write_policy = match policy.level {
        SandboxLevel::None => r#"(allow file-write* (regex #"^/"))"#.to_string(),
        SandboxLevel::ReadOnly => String::new(),
        SandboxLevel::Workspace => {
            let writable_roots = policy.effective_writable_roots(cwd);
            let (text, write_params) = create_file_write_policy(&writable_roots);
            params.extend(write_params);
            text
        }
    };

    // Every level allows reading anywhere; only writes are confined.
    let file_read_policy = "; allow read-only file operations\n(allow file-read*)";

    let network_policy = if policy.network_access {
        if let Some(cache_dir) = darwin_user_cache_dir() {
            params.push(("DARWIN_USER_CACHE_DIR".to_string(), cache_dir));
        }
        SEATBELT_NETWORK_POLICY
    } else {
        ""
    };

    let full_policy =
        format!("{SEATBELT_BASE_POLICY}\n{file_read_policy}\n{file_write_policy}\n{network_policy}");
    (full_policy, params)
}

/// Builds the `(allow file-write* ...)` clause, parameterising each writable
/// root and carving its protected subpaths back out with `require-not`.
fn create_file_write_policy(writable_roots: &[WritableRoot]) -> (String, Vec<(String, String)>) {
    if writable_roots.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut params = Vec::new();
    let mut policy_parts = Vec::new();

    for (index, root) in writable_roots.iter().enumerate() {
        let canonical_root = canonicalize_lossy(&root.path);
        let root_param = format!("WRITABLE_ROOT_{index}");
        params.push((root_param.clone(), canonical_root.display().to_string()));

        if root.read_only_subpaths.is_empty() {
            policy_parts.push(format!("(subpath (param \"{root_param}\"))"));
            continue;
        }

        let mut require_parts = vec![format!("(subpath (param \"{root_param}\"))")];
        for (subpath_index, ro_path) in root.read_only_subpaths.iter().enumerate() {
            let canonical_ro = canonicalize_lossy(ro_path);
            let ro_param = format!("WRITABLE_ROOT_{index}_RO_{subpath_index}");
            require_parts.push(format!("(require-not (subpath (param \"{ro_param}\")))"));
            params.push((ro_param, canonical_ro.display().to_string()));
        }
        policy_parts.push(format!("(require-all {} )", require_parts.join(" ")));
    }

    let policy_text = format!("(allow file-write*\n{}\n)", policy_parts.join(" "));
    (policy_text, params)
}

fn canonicalize_lossy(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// `confstr(_CS_DARWIN_USER_CACHE_DIR)`, typically `/var/folders/.../C/`.
/// Network-policy writes there are needed by DNS/certificate lookups.
fn darwin_user_cache_dir() -> Option<String> {
    const CS_DARWIN_USER_CACHE_DIR: std::os::raw::c_int = 65538;
    let mut buf = [0u8; 1024];
    // SAFETY: buf is a correctly sized, stack-local buffer; confstr writes at
    // most buf.len() bytes including the trailing nul.
    let len = unsafe {
        libc::confstr(
            CS_DARWIN_USER_CACHE_DIR,
            buf.as_mut_ptr() as *mut std::os::raw::c_char,
            buf.len(),
        )
    };
    if len == 0 || len as usize > buf.len() {
        return None;
    }
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let path = std::str::from_utf8(&buf[..end]).ok()?;
    Some(canonicalize_lossy(Path::new(path)).display().to_string())
}

#[cfg(test)]
#[path = "seatbelt.test.rs"]
mod tests;
