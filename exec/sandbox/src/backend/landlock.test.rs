use super::*;
use crate::policy::SandboxPolicy;
use crate::policy::WritableRoot;

#[tokio::test]
async fn runs_command_under_none_policy() {
    let backend = LandlockBackend;
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
    assert_eq!(result.stdout.trim(), "hi");
    assert_eq!(result.sandbox_kind, SandboxKind::Landlock);
}

#[tokio::test]
async fn workspace_policy_allows_write_inside_cwd() {
    let dir = tempfile::tempdir().expect("tempdir");
    let backend = LandlockBackend;
    let result = backend
        .execute(
            &[
                "sh".to_string(),
                "-c".to_string(),
                "echo hello > out.txt && cat out.txt".to_string(),
            ],
            dir.path(),
            &SandboxPolicy::workspace(vec![WritableRoot::from_path(dir.path())], false),
            Some(Duration::from_secs(5)),
            None,
        )
        .await;
    assert_eq!(result.stdout.trim(), "hello");
}

#[tokio::test]
async fn missing_command_reports_exit_code_127() {
    let backend = LandlockBackend;
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
