use super::*;

#[test]
fn duration_ms_is_none_until_complete() {
    let metrics = ToolMetrics::start("read_file", "call-1", true);
    assert_eq!(metrics.duration_ms(), None);
}

#[test]
fn complete_records_success_and_duration() {
    let mut metrics = ToolMetrics::start("read_file", "call-1", true);
    metrics.complete(true, None);
    assert!(metrics.success);
    assert!(metrics.duration_ms().is_some());
}

#[test]
fn turn_metrics_aggregates_parallel_and_serial_counts() {
    let mut turn = TurnMetrics::new("turn-1");

    let mut read = ToolMetrics::start("read_file", "call-1", true);
    read.complete(true, None);
    turn.add_tool(read);

    let mut write = ToolMetrics::start("write_file", "call-2", false);
    write.complete(false, Some("disk full".to_string()));
    turn.add_tool(write);

    assert_eq!(turn.parallel_count(), 1);
    assert_eq!(turn.serial_count(), 1);
    assert_eq!(turn.success_count(), 1);
    assert_eq!(turn.tool_calls.len(), 2);
}
