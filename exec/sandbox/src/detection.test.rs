use super::*;

#[test]
fn detects_permission_denied() {
    assert!(is_sandbox_denied("bash: foo: Permission denied", Some(1)));
}

#[test]
fn detects_read_only_file_system() {
    assert!(is_sandbox_denied(
        "sh: cannot write: Read-only file system",
        Some(1)
    ));
}

#[test]
fn ordinary_failure_is_not_a_denial() {
    assert!(!is_sandbox_denied("command not found", Some(127)));
    assert!(!is_sandbox_denied("assertion failed at line 10", Some(1)));
}

#[test]
fn get_denial_reason_returns_matched_keyword() {
    assert_eq!(
        get_denial_reason("Operation not permitted", Some(1)),
        Some("operation not permitted".to_string())
    );
}

#[test]
fn get_denial_reason_is_case_insensitive() {
    assert!(get_denial_reason("SANDBOX VIOLATION", None).is_some());
}
