use super::*;
use crate::policy::SandboxPolicy;

#[test]
fn transform_command_wraps_with_sandbox_exec() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cmd = vec!["echo".to_string(), "hi".to_string()];
    let args = transform_command(&cmd, &SandboxPolicy::read_only(false), dir.path());
    assert_eq!(args[0], SANDBOX_EXEC_PATH);
    assert_eq!(args[1], "-p");
    assert!(args.contains(&"--".to_string()));
    assert_eq!(&args[args.len() - 2..], ["echo", "hi"]);
}

#[test]
fn read_only_policy_has_no_write_clause() {
    let (policy_text, params) = create_seatbelt_policy(&SandboxPolicy::read_only(false), Path::new("/tmp"));
    assert!(!policy_text.contains("(allow file-write*"));
    assert!(params.is_empty());
}

#[test]
fn none_policy_allows_writes_everywhere() {
    let (policy_text, _params) = create_seatbelt_policy(&SandboxPolicy::none(), Path::new("/tmp"));
    assert!(policy_text.contains(r#"(allow file-write* (regex #"^/"))"#));
}

#[test]
fn workspace_policy_parameterises_writable_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    let policy = SandboxPolicy::workspace(Vec::new(), false);
    let (policy_text, params) = create_seatbelt_policy(&policy, dir.path());
    assert!(policy_text.contains("(subpath (param \"WRITABLE_ROOT_0\"))"));
    assert!(params.iter().any(|(k, _)| k == "WRITABLE_ROOT_0"));
}

#[test]
fn workspace_policy_carves_out_protected_subpaths() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join(".git")).expect("mkdir");
    let root = WritableRoot::from_path(dir.path());
    let (policy_text, params) = create_file_write_policy(&[root]);
    assert!(policy_text.contains("require-not"));
    assert!(params.iter().any(|(k, _)| k == "WRITABLE_ROOT_0_RO_0"));
}

#[test]
fn empty_writable_roots_produce_empty_clause() {
    let (policy_text, params) = create_file_write_policy(&[]);
    assert!(policy_text.is_empty());
    assert!(params.is_empty());
}

#[test]
fn network_enabled_includes_network_policy() {
    let (policy_text, _params) = create_seatbelt_policy(&SandboxPolicy::read_only(true), Path::new("/tmp"));
    assert!(policy_text.contains("(allow network-outbound)"));
}

#[test]
fn network_disabled_omits_network_policy() {
    let (policy_text, _params) = create_seatbelt_policy(&SandboxPolicy::read_only(false), Path::new("/tmp"));
    assert!(!policy_text.contains("(allow network-outbound)"));
}

#[tokio::test]
async fn runs_command_under_read_only_policy() {
    let backend = SeatbeltBackend;
    let cwd = std::env::temp_dir();
    let result = backend
        .execute(
            &["echo".to_string(), "hi".to_string()],
            &cwd,
            &SandboxPolicy::read_only(false),
            Some(Duration::from_secs(5)),
            None,
        )
        .await;
    assert_eq!(result.stdout.trim(), "hi");
    assert_eq!(result.sandbox_kind, SandboxKind::Seatbelt);
}
