//! Tests for gateway error rendering

use kodegen_tools_seospider::gateway::ErrorContext;
use kodegen_tools_seospider::{BrokerError, CapacityKind};
use std::time::Duration;

#[test]
fn test_error_context_formatting() {
    let msg = ErrorContext::new("Read crawl data")
        .detail("export_id: \"export-1a2b3c4d\"")
        .detail("Export not found")
        .suggest("Verify export_id is correct")
        .suggest("Run export_crawl again")
        .build();

    assert!(msg.starts_with("Operation failed: Read crawl data\n"));
    assert!(msg.contains("Details:"));
    assert!(msg.contains("  - export_id: \"export-1a2b3c4d\""));
    assert!(msg.contains("Suggestions:"));
    assert!(msg.contains("  - Run export_crawl again"));
}

#[test]
fn test_error_context_without_sections() {
    let msg = ErrorContext::new("Summarize storage").build();
    assert_eq!(msg, "Operation failed: Summarize storage\n");
}

#[test]
fn test_not_found_lists_available_tokens() {
    let error = BrokerError::NotFound {
        what: "export",
        name: "export-ffffffff".to_string(),
        available: vec!["export-00000001".to_string(), "export-00000002".to_string()],
    };
    let msg = ErrorContext::new("Read crawl data").from_error(&error).build();

    assert!(msg.contains("  - export not found: export-ffffffff"));
    assert!(msg.contains("  - Available: export-00000001, export-00000002"));
    assert!(msg.contains("Run export_crawl again"));
}

#[test]
fn test_not_found_with_nothing_active() {
    let error = BrokerError::NotFound {
        what: "crawl job",
        name: "crawl-12345678".to_string(),
        available: Vec::new(),
    };
    let msg = ErrorContext::new("Get crawl status").from_error(&error).build();
    assert!(msg.contains("  - No active crawl jobs"));
}

#[test]
fn test_capacity_message_names_limit() {
    let error = BrokerError::CapacityExceeded {
        kind: CapacityKind::Crawls,
        limit: 2,
    };
    let msg = ErrorContext::new("Start crawl").from_error(&error).build();
    assert!(msg.contains("Maximum 2 concurrent crawls reached"));
    assert!(error.is_retryable());
}

#[test]
fn test_export_timeout_mentions_kept_export() {
    let error = BrokerError::Timeout {
        operation: "export",
        limit: Duration::from_secs(600),
        export_id: Some("export-0badf00d".to_string()),
    };
    let msg = ErrorContext::new("Export crawl").from_error(&error).build();
    assert!(msg.contains("export timed out after 600s"));
    assert!(msg.contains("Partial export kept as export-0badf00d"));
}

#[test]
fn test_empty_result_with_front_end_running() {
    let error = BrokerError::EmptyResult {
        export_id: "export-00c0ffee".to_string(),
        db_id: "abc123".to_string(),
        file_count: 3,
        front_end_running: true,
    };
    let msg = ErrorContext::new("Export crawl").from_error(&error).build();
    assert!(msg.contains("produced 3 file(s) with no data rows"));
    assert!(msg.contains("The SEO Spider GUI is currently running"));
    assert!(msg.contains("Quit the GUI and re-run the export"));
}

#[test]
fn test_missing_csv_output_suggests_db_id() {
    let error = BrokerError::NoCsvOutput {
        export_id: "export-0badf00d".to_string(),
        db_id: "nosuchdb".to_string(),
    };
    let msg = ErrorContext::new("Export crawl").from_error(&error).build();
    assert!(msg.contains("Export export-0badf00d completed but no CSV files were generated"));
    assert!(msg.contains("Check the DB ID with list_crawls"));
    assert!(!msg.contains("GUI"));
    assert_eq!(error.kind(), "no_csv_output");
    assert!(!error.is_retryable());
}

#[test]
fn test_export_failure_includes_output() {
    let error = BrokerError::ExportFailed {
        exit_code: Some(1),
        output_tail: "ERROR - crawl not found".to_string(),
    };
    let msg = ErrorContext::new("Export crawl").from_error(&error).build();
    assert!(msg.contains("Tool exited with code 1"));
    assert!(msg.contains("Last output:\nERROR - crawl not found"));
    assert!(!error.is_retryable());
}
