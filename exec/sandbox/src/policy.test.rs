use super::*;

#[test]
fn none_policy_is_unconfined_and_allows_network() {
    let policy = SandboxPolicy::none();
    assert!(policy.level.is_unconfined());
    assert!(policy.network_access);
    assert!(policy.effective_writable_roots(Path::new("/tmp")).is_empty());
}

#[test]
fn read_only_policy_has_no_writable_roots() {
    let policy = SandboxPolicy::read_only(false);
    assert!(!policy.level.allows_write());
    assert!(!policy.network_access);
    assert!(policy.effective_writable_roots(Path::new("/tmp")).is_empty());
}

#[test]
fn workspace_policy_includes_cwd_as_writable_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    let policy = SandboxPolicy::workspace(Vec::new(), true);
    let roots = policy.effective_writable_roots(dir.path());
    assert_eq!(roots.len(), 1);
    assert_eq!(
        fs::canonicalize(&roots[0].path).expect("canonicalize"),
        fs::canonicalize(dir.path()).expect("canonicalize")
    );
}

#[test]
fn workspace_policy_deduplicates_roots_by_canonical_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let policy = SandboxPolicy::workspace(vec![WritableRoot::from_path(dir.path())], true);
    let roots = policy.effective_writable_roots(dir.path());
    assert_eq!(roots.len(), 1);
}

#[test]
fn writable_root_from_path_detects_git_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join(".git")).expect("mkdir");
    let root = WritableRoot::from_path(dir.path());
    assert_eq!(root.read_only_subpaths, vec![dir.path().join(".git")]);
}

#[test]
fn writable_root_from_path_follows_gitdir_pointer_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let real_gitdir = dir.path().join("real-gitdir");
    fs::write(
        dir.path().join(".git"),
        format!("gitdir: {}\n", real_gitdir.display()),
    )
    .expect("write pointer file");
    let root = WritableRoot::from_path(dir.path());
    assert_eq!(root.read_only_subpaths, vec![real_gitdir]);
}

#[test]
fn writable_root_from_path_protects_config_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join(".crystalyse")).expect("mkdir");
    let root = WritableRoot::from_path(dir.path());
    assert_eq!(root.read_only_subpaths, vec![dir.path().join(".crystalyse")]);
}

#[test]
fn writable_root_from_path_with_no_metadata_has_no_protected_subpaths() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = WritableRoot::from_path(dir.path());
    assert!(root.read_only_subpaths.is_empty());
}
