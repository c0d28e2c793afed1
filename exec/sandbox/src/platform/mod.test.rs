use super::*;
use crate::policy::SandboxPolicy;

#[test]
fn test_platform_sandbox_available() {
    let sandbox = platform_sandbox();
    let expected = cfg!(target_os = "macos") || cfg!(target_os = "linux");
    assert_eq!(sandbox.available(), expected);
}

#[test]
fn test_platform_sandbox_apply_none_policy() {
    let sandbox = platform_sandbox();
    let policy = SandboxPolicy::none();
    assert!(sandbox.apply(&policy, &[]).is_ok());
}
