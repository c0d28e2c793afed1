//! Sandbox backends: wrap a command invocation with platform-specific
//! confinement and report the outcome, never aborting the caller's turn.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::policy::SandboxPolicy;
use crate::result::SandboxResult;

#[cfg(target_os = "linux")]
pub mod landlock;
pub mod noop;
#[cfg(target_os = "macos")]
pub mod seatbelt;

/// Environment variable every backend sets so a sandboxed subprocess can
/// introspect its own confinement.
pub const SANDBOX_ENV_VAR: &str = "CRYSTALYSE_SANDBOX";
/// Set to `"1"` on Linux when network access has been blocked via seccomp.
pub const SANDBOX_NETWORK_DISABLED_ENV_VAR: &str = "CRYSTALYSE_SANDBOX_NETWORK_DISABLED";

/// A platform-specific command-execution backend.
#[async_trait::async_trait]
pub trait SandboxBackend: Send + Sync {
    /// Runs `cmd` (argv, `cmd[0]` is the program) under this backend's
    /// confinement, in `cwd`, per `policy`. Never returns an error for
    /// sandbox denials, timeouts, or exec failures — those are reported via
    /// the fields of [`SandboxResult`].
    async fn execute(
        &self,
        cmd: &[String],
        cwd: &Path,
        policy: &SandboxPolicy,
        timeout: Option<Duration>,
        env: Option<HashMap<String, String>>,
    ) -> SandboxResult;
}

/// Returns the platform-appropriate backend: Seatbelt on macOS, Landlock on
/// Linux, a logged no-op everywhere else.
pub fn get_backend() -> Box<dyn SandboxBackend> {
    #[cfg(target_os = "macos")]
    {
        Box::new(seatbelt::SeatbeltBackend)
    }
    #[cfg(target_os = "linux")]
    {
        Box::new(landlock::LandlockBackend)
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        tracing::warn!("no sandbox backend available on this platform, running unconfined");
        Box::new(noop::NoSandboxBackend)
    }
}

/// Runs an already-configured `tokio::process::Command` (program, args, cwd
/// and env already set by the caller) and turns its outcome into a
/// [`SandboxResult`], applying `timeout` and denial detection uniformly
/// across every backend.
pub(crate) async fn run(
    mut command: tokio::process::Command,
    timeout: Option<Duration>,
    sandbox_kind: crate::result::SandboxKind,
) -> SandboxResult {
    command.stdout(std::process::Stdio::piped());
    command.stderr(std::process::Stdio::piped());

    let child = match command.spawn() {
        Ok(child) => child,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return SandboxResult {
                stdout: String::new(),
                stderr: "Command not found".to_string(),
                exit_code: 127,
                sandbox_kind,
                sandbox_denied: false,
                denial_reason: None,
            };
        }
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            return SandboxResult {
                stdout: String::new(),
                stderr: err.to_string(),
                exit_code: 126,
                sandbox_kind,
                sandbox_denied: false,
                denial_reason: None,
            };
        }
        Err(err) => {
            return SandboxResult {
                stdout: String::new(),
                stderr: err.to_string(),
                exit_code: -1,
                sandbox_kind,
                sandbox_denied: false,
                denial_reason: None,
            };
        }
    };

    let output = match timeout {
        Some(duration) => match tokio::time::timeout(duration, child.wait_with_output()).await {
            Ok(result) => result,
            Err(_) => {
                return SandboxResult {
                    stdout: String::new(),
                    stderr: format!("Command timed out after {}s", duration.as_secs()),
                    exit_code: -1,
                    sandbox_kind,
                    sandbox_denied: false,
                    denial_reason: None,
                };
            }
        },
        None => child.wait_with_output().await,
    };

    let output = match output {
        Ok(output) => output,
        Err(err) => {
            return SandboxResult {
                stdout: String::new(),
                stderr: err.to_string(),
                exit_code: -1,
                sandbox_kind,
                sandbox_denied: false,
                denial_reason: None,
            };
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let exit_code = output.status.code().unwrap_or(-1);
    let denial_reason =
        crate::detection::get_denial_reason(&format!("{stdout}{stderr}"), Some(exit_code));

    SandboxResult {
        stdout,
        stderr,
        exit_code,
        sandbox_kind,
        sandbox_denied: denial_reason.is_some(),
        denial_reason,
    }
}

/// Runs `cmd` with no confinement applied at all, tagging the result with
/// `sandbox_kind` (used by the no-op backend, and by other backends as a
/// fallback when their platform-specific setup fails).
pub(crate) async fn run_plain(
    cmd: &[String],
    cwd: &Path,
    timeout: Option<Duration>,
    env: Option<HashMap<String, String>>,
    sandbox_kind: crate::result::SandboxKind,
) -> SandboxResult {
    let Some((program, args)) = cmd.split_first() else {
        return SandboxResult {
            stdout: String::new(),
            stderr: "empty command".to_string(),
            exit_code: 127,
            sandbox_kind,
            sandbox_denied: false,
            denial_reason: None,
        };
    };

    let mut command = tokio::process::Command::new(program);
    command.args(args).current_dir(cwd);
    apply_sandbox_env(&mut command, sandbox_kind, false);
    if let Some(env) = env {
        command.envs(env);
    }

    run(command, timeout, sandbox_kind).await
}

/// Sets the `CRYSTALYSE_SANDBOX` (and, on Linux with blocked network,
/// `CRYSTALYSE_SANDBOX_NETWORK_DISABLED`) environment markers on `command`.
pub(crate) fn apply_sandbox_env(
    command: &mut tokio::process::Command,
    sandbox_kind: crate::result::SandboxKind,
    network_disabled: bool,
) {
    command.env(SANDBOX_ENV_VAR, sandbox_kind.env_value());
    if network_disabled {
        command.env(SANDBOX_NETWORK_DISABLED_ENV_VAR, "1");
    }
}

#[cfg(test)]
#[path = "mod.test.rs"]
mod tests;
