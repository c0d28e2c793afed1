//! Heuristic detection of sandbox denials from a finished command's output.

/// Substrings (checked case-insensitively) that indicate the OS sandbox
/// layer itself rejected the operation, as opposed to the command failing
/// for its own reasons.
pub const SANDBOX_DENIED_KEYWORDS: &[&str] = &[
    "operation not permitted",
    "permission denied",
    "read-only file system",
    "seccomp",
    "sandbox",
    "landlock",
    "failed to write file",
    "cannot create",
    "access denied",
    "not allowed",
];

/// SIGSYS, the signal Landlock/seccomp deliver on a blocked syscall when no
/// signal handler traps it; used to recognise a `128 + signal` exit code.
const SIGSYS: i32 = 31;

/// Returns true if `combined_output` or `exit_code` indicate the sandbox
/// denied the operation, rather than the command failing on its own.
pub fn is_sandbox_denied(combined_output: &str, exit_code: Option<i32>) -> bool {
    if let Some(reason) = get_denial_reason(combined_output, exit_code) {
        return !reason.is_empty();
    }
    false
}

/// Returns the matched keyword (or a signal-based description) if the output
/// looks like a sandbox denial, else `None`.
pub fn get_denial_reason(combined_output: &str, exit_code: Option<i32>) -> Option<String> {
    let lower = combined_output.to_lowercase();
    for keyword in SANDBOX_DENIED_KEYWORDS {
        if lower.contains(keyword) {
            return Some((*keyword).to_string());
        }
    }

    if cfg!(target_os = "linux")
        && let Some(code) = exit_code
        && code == 128 + SIGSYS
    {
        return Some("killed by SIGSYS (blocked syscall)".to_string());
    }

    None
}

#[cfg(test)]
#[path = "detection.test.rs"]
mod tests;
