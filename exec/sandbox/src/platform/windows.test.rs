use super::*;
use crate::policy::SandboxPolicy;

#[test]
fn test_windows_sandbox_available() {
    let sandbox = WindowsSandbox;
    assert!(!sandbox.available());
}

#[test]
fn test_windows_sandbox_apply_is_a_noop() {
    let sandbox = WindowsSandbox;
    assert!(sandbox.apply(&SandboxPolicy::none(), &[]).is_ok());
}
