use super::*;
use crate::policy::SandboxPolicy;

#[test]
fn test_unix_sandbox_available() {
    let sandbox = UnixSandbox;
    let expected = cfg!(target_os = "macos") || cfg!(target_os = "linux");
    assert_eq!(sandbox.available(), expected);
}

#[test]
fn test_unix_sandbox_apply_none_policy_is_a_noop() {
    // `SandboxLevel::None` short-circuits before any real restriction is
    // applied, so this is safe to call from the test process itself.
    let sandbox = UnixSandbox;
    let policy = SandboxPolicy::none();
    assert!(sandbox.apply(&policy, &[]).is_ok());
}
