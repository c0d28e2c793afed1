//! The outcome of a sandboxed subprocess invocation.

use serde::Serialize;

/// Which backend actually ran the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SandboxKind {
    None,
    Seatbelt,
    Landlock,
}

impl SandboxKind {
    /// The value written into the `CRYSTALYSE_SANDBOX` environment variable.
    pub fn env_value(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Seatbelt => "seatbelt",
            Self::Landlock => "landlock",
        }
    }
}

/// The result of running one command through a [`crate::backend::SandboxBackend`].
#[derive(Debug, Clone, Serialize)]
pub struct SandboxResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub sandbox_kind: SandboxKind,
    pub sandbox_denied: bool,
    pub denial_reason: Option<String>,
}

impl SandboxResult {
    pub fn combined_output(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}
