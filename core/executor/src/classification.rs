//! Static classification of tool names into parallel-safe reads and
//! serial-only mutations, used as the default when a [`crate::tool::ToolSpec`]
//! doesn't set its own `supports_parallel` flag explicitly.

/// Read-only tools known to be safe to run concurrently with each other.
pub const PARALLEL_TOOLS: &[&str] = &[
    "query_optimade",
    "web_search",
    "read_file",
    "read_artifact",
    "list_files",
    "list_artifacts",
    "get_cached_computation",
    "search_previous_discoveries",
    "get_all_computations_for_formula",
];

/// Mutating tools that must be serialised against every other call.
pub const SERIAL_TOOLS: &[&str] = &[
    "run_shell_command",
    "execute_python",
    "execute_skill_script",
    "write_file",
    "write_artifact",
];

/// Whether `tool_name` is known to support parallel execution. Unknown tools
/// default to serial, since that's the safe assumption for a tool that might
/// mutate state.
pub fn classify_tool(tool_name: &str) -> bool {
    if PARALLEL_TOOLS.contains(&tool_name) {
        return true;
    }
    if SERIAL_TOOLS.contains(&tool_name) {
        return false;
    }
    false
}

#[cfg(test)]
#[path = "classification.test.rs"]
mod tests;
