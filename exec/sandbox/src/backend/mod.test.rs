use super::*;

#[tokio::test]
async fn run_plain_captures_stdout_and_exit_code() {
    let cwd = std::env::temp_dir();
    let result = run_plain(
        &["echo".to_string(), "hi".to_string()],
        &cwd,
        None,
        None,
        crate::result::SandboxKind::None,
    )
    .await;
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout.trim(), "hi");
    assert!(!result.sandbox_denied);
}

#[tokio::test]
async fn run_plain_reports_missing_binary_as_127() {
    let cwd = std::env::temp_dir();
    let result = run_plain(
        &["definitely-not-a-real-binary".to_string()],
        &cwd,
        None,
        None,
        crate::result::SandboxKind::None,
    )
    .await;
    assert_eq!(result.exit_code, 127);
}

#[tokio::test]
async fn run_plain_times_out() {
    let cwd = std::env::temp_dir();
    let result = run_plain(
        &["sleep".to_string(), "5".to_string()],
        &cwd,
        Some(Duration::from_millis(50)),
        None,
        crate::result::SandboxKind::None,
    )
    .await;
    assert_eq!(result.exit_code, -1);
    assert!(result.stderr.contains("timed out"));
}

#[tokio::test]
async fn empty_command_reports_exit_code_127() {
    let cwd = std::env::temp_dir();
    let result = run_plain(&[], &cwd, None, None, crate::result::SandboxKind::None).await;
    assert_eq!(result.exit_code, 127);
}

#[test]
fn apply_sandbox_env_sets_markers() {
    let mut command = tokio::process::Command::new("true");
    apply_sandbox_env(&mut command, crate::result::SandboxKind::Landlock, true);
    let std_command: &std::process::Command = command.as_std();
    let envs: Vec<_> = std_command.get_envs().collect();
    assert!(envs.iter().any(|(k, v)| *k == SANDBOX_ENV_VAR && *v == Some(std::ffi::OsStr::new("landlock"))));
    assert!(envs.iter().any(|(k, v)| *k == SANDBOX_NETWORK_DISABLED_ENV_VAR && *v == Some(std::ffi::OsStr::new("1"))));
}

#[test]
fn get_backend_returns_a_backend() {
    let _backend = get_backend();
}
