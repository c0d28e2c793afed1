use super::*;
use strum::IntoEnumIterator;

#[test]
fn test_status_code_values() {
    assert_eq!(StatusCode::Success as i32, 00_000);
    assert_eq!(StatusCode::Unknown as i32, 01_000);
    assert_eq!(StatusCode::InvalidArguments as i32, 02_000);
    assert_eq!(StatusCode::UnknownTool as i32, 06_000);
    assert_eq!(StatusCode::SandboxDenied as i32, 07_000);
    assert_eq!(StatusCode::SummariserFailed as i32, 08_000);
    assert_eq!(StatusCode::HashingFailed as i32, 09_000);
    assert_eq!(StatusCode::InvalidConfig as i32, 10_000);
    assert_eq!(StatusCode::Timeout as i32, 12_000);
}

#[test]
fn test_is_success() {
    assert!(StatusCode::is_success(0));
    assert!(!StatusCode::is_success(01_000));
}

#[test]
fn test_is_retryable() {
    assert!(StatusCode::ToolTimeout.is_retryable());
    assert!(StatusCode::Timeout.is_retryable());
    assert!(StatusCode::SummariserFailed.is_retryable());
    assert!(!StatusCode::InvalidArguments.is_retryable());
    assert!(!StatusCode::UnknownTool.is_retryable());
}

#[test]
fn test_should_log_error() {
    assert!(StatusCode::Unknown.should_log_error());
    assert!(StatusCode::Internal.should_log_error());
    assert!(StatusCode::HandlerFailed.should_log_error());
    assert!(!StatusCode::InvalidArguments.should_log_error());
    assert!(!StatusCode::UnknownTool.should_log_error());
}

#[test]
fn test_display() {
    assert_eq!(format!("{}", StatusCode::Success), "Success");
    assert_eq!(format!("{}", StatusCode::SandboxDenied), "SandboxDenied");
}

#[test]
fn test_name() {
    assert_eq!(StatusCode::Success.name(), "Success");
    assert_eq!(StatusCode::UnknownTool.name(), "UnknownTool");
    assert_eq!(StatusCode::InvalidArguments.name(), "InvalidArguments");
    assert_eq!(StatusCode::ExtractionFailed.name(), "ExtractionFailed");
}

#[test]
fn test_category() {
    assert_eq!(StatusCode::Success.category(), StatusCategory::Success);
    assert_eq!(StatusCode::Unknown.category(), StatusCategory::Common);
    assert_eq!(
        StatusCode::InvalidArguments.category(),
        StatusCategory::Input
    );
    assert_eq!(StatusCode::UnknownTool.category(), StatusCategory::Tool);
    assert_eq!(StatusCode::SandboxDenied.category(), StatusCategory::Sandbox);
    assert_eq!(
        StatusCode::SummariserFailed.category(),
        StatusCategory::Compaction
    );
    assert_eq!(
        StatusCode::HashingFailed.category(),
        StatusCategory::Provenance
    );
    assert_eq!(StatusCode::InvalidConfig.category(), StatusCategory::Config);
    assert_eq!(StatusCode::Timeout.category(), StatusCategory::Resource);
}

#[test]
fn test_metadata_consistency() {
    for code in StatusCode::iter() {
        let meta = code.meta();
        let value = code as i32;

        match meta.category {
            StatusCategory::Success => assert_eq!(value, 0),
            StatusCategory::Common => assert!((01_000..02_000).contains(&value)),
            StatusCategory::Input => assert!((02_000..03_000).contains(&value)),
            StatusCategory::Tool => assert!((06_000..07_000).contains(&value)),
            StatusCategory::Sandbox => assert!((07_000..08_000).contains(&value)),
            StatusCategory::Compaction => assert!((08_000..09_000).contains(&value)),
            StatusCategory::Provenance => assert!((09_000..10_000).contains(&value)),
            StatusCategory::Config => assert!((10_000..11_000).contains(&value)),
            StatusCategory::Resource => assert!((12_000..13_000).contains(&value)),
        }
    }
}

#[test]
fn test_retryable_rules() {
    assert!(StatusCode::ToolTimeout.is_retryable());
    assert!(StatusCode::Timeout.is_retryable());
    assert!(StatusCode::Internal.is_retryable());
    assert!(StatusCode::SummariserFailed.is_retryable());

    assert!(!StatusCode::UnknownTool.is_retryable());
    assert!(!StatusCode::ToolCancelled.is_retryable());
    assert!(!StatusCode::InvalidArguments.is_retryable());
    assert!(!StatusCode::InvalidConfig.is_retryable());
    assert!(!StatusCode::SandboxDenied.is_retryable());
}

#[test]
fn test_log_error_rules() {
    assert!(StatusCode::Unknown.should_log_error());
    assert!(StatusCode::Internal.should_log_error());
    assert!(StatusCode::External.should_log_error());
    assert!(StatusCode::HandlerFailed.should_log_error());
    assert!(StatusCode::HashingFailed.should_log_error());

    assert!(!StatusCode::InvalidArguments.should_log_error());
    assert!(!StatusCode::UnknownTool.should_log_error());
    assert!(!StatusCode::SandboxDenied.should_log_error());
}
