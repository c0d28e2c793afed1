use super::*;

#[test]
fn known_parallel_tool_classifies_as_parallel() {
    assert!(classify_tool("read_file"));
    assert!(classify_tool("query_optimade"));
}

#[test]
fn known_serial_tool_classifies_as_serial() {
    assert!(!classify_tool("write_file"));
    assert!(!classify_tool("run_shell_command"));
}

#[test]
fn unknown_tool_defaults_to_serial() {
    assert!(!classify_tool("some_future_tool"));
}
