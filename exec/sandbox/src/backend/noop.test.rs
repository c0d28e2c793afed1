use super::*;
use crate::policy::SandboxPolicy;

#[tokio::test]
async fn runs_command_and_captures_output() {
    let backend = NoSandboxBackend;
    let cwd = std::env::temp_dir();
    let result = backend
        .execute(
            &["echo".to_string(), "hi".to_string()],
            &cwd,
            &SandboxPolicy::none(),
            None,
            None,
        )
        .await;
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout.trim(), "hi");
    assert_eq!(result.sandbox_kind, SandboxKind::None);
}

#[tokio::test]
async fn missing_command_reports_exit_code_127() {
    let backend = NoSandboxBackend;
    let cwd = std::env::temp_dir();
    let result = backend
        .execute(
            &["definitely-not-a-real-binary".to_string()],
            &cwd,
            &SandboxPolicy::none(),
            None,
            None,
        )
        .await;
    assert_eq!(result.exit_code, 127);
}
