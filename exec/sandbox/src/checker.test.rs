use super::*;
use crate::policy::WritableRoot;
use std::path::PathBuf;

fn workspace_checker() -> PermissionChecker {
    let root = WritableRoot {
        path: PathBuf::from("/home/user/project"),
        read_only_subpaths: vec![PathBuf::from("/home/user/project/.git")],
    };
    let mut policy = SandboxPolicy::workspace(vec![root], false);
    policy.include_tmp = false;
    policy.include_tmpdir = false;
    PermissionChecker {
        writable_roots: policy.writable_roots.clone(),
        policy,
    }
}

#[test]
fn test_none_mode_allows_everything() {
    let checker = PermissionChecker::new(SandboxPolicy::none(), Path::new("/any/cwd"));
    assert!(checker.check_path(Path::new("/any/path"), false).is_ok());
    assert!(checker.check_path(Path::new("/any/path"), true).is_ok());
    assert!(checker.check_network().is_ok());
}

#[test]
fn test_readonly_allows_reads() {
    let checker = PermissionChecker::new(SandboxPolicy::read_only(false), Path::new("/any"));
    assert!(checker.check_path(Path::new("/any/path"), false).is_ok());
}

#[test]
fn test_readonly_denies_writes() {
    let checker = PermissionChecker::new(SandboxPolicy::read_only(false), Path::new("/any"));
    assert!(checker.check_path(Path::new("/any/path"), true).is_err());
}

#[test]
fn test_readonly_denies_network_by_default() {
    let checker = PermissionChecker::new(SandboxPolicy::read_only(false), Path::new("/any"));
    assert!(checker.check_network().is_err());
}

#[test]
fn test_readonly_allows_network_when_configured() {
    let checker = PermissionChecker::new(SandboxPolicy::read_only(true), Path::new("/any"));
    assert!(checker.check_network().is_ok());
}

#[test]
fn test_workspace_allows_write_to_root() {
    let checker = workspace_checker();
    assert!(
        checker
            .check_path(Path::new("/home/user/project/src/main.rs"), true)
            .is_ok()
    );
}

#[test]
fn test_workspace_denies_write_outside_roots() {
    let checker = workspace_checker();
    assert!(checker.check_path(Path::new("/etc/passwd"), true).is_err());
}

#[test]
fn test_workspace_allows_read_anywhere() {
    let checker = workspace_checker();
    assert!(checker.check_path(Path::new("/etc/passwd"), false).is_ok());
}

#[test]
fn test_workspace_protected_subpath_denied_even_under_root() {
    let checker = workspace_checker();
    assert!(
        checker
            .check_path(Path::new("/home/user/project/.git/HEAD"), true)
            .is_err()
    );
}

#[test]
fn test_is_writable_path_prefix_match() {
    let checker = workspace_checker();
    assert!(checker.is_writable_path(Path::new("/home/user/project/src/lib.rs")));
    assert!(!checker.is_writable_path(Path::new("/home/user/other")));
}
