use super::*;

#[test]
fn build_applies_defaults() {
    let config = CoreConfig::builder().build().expect("defaults are valid");
    assert_eq!(config.per_call_timeout, crystalyse_executor::DEFAULT_TIMEOUT);
    assert_eq!(config.compaction.threshold, 0.8);
    assert_eq!(config.sandbox.level, crystalyse_sandbox::SandboxLevel::ReadOnly);
}

#[test]
fn build_rejects_out_of_range_threshold() {
    let config = CoreConfig::builder()
        .with_compaction(CompactionConfig {
            threshold: 1.5,
            ..CompactionConfig::default()
        })
        .build();
    assert!(config.is_err());
}

#[test]
fn require_platform_sandbox_is_accepted_on_a_supported_platform() {
    let supported = matches!(std::env::consts::OS, "macos" | "linux");
    let result = CoreConfig::builder().require_platform_sandbox(true).build();
    assert_eq!(result.is_ok(), supported);
}
