//! Tests for the type-safe configuration builder pattern

use kodegen_tools_seospider::{BrokerConfig, BrokerError};
use std::path::Path;
use std::time::Duration;

#[test]
fn test_builder_requires_tool_path() {
    // This should not compile if uncommented - testing compile-time guarantees
    // let config = BrokerConfig::builder().build();

    let config = BrokerConfig::builder()
        .tool_path("/opt/seospider/launcher")
        .export_root("/tmp/seospider-exports")
        .data_dir("/tmp/seospider-data")
        .build()
        .unwrap();

    assert_eq!(config.tool_path(), Path::new("/opt/seospider/launcher"));
    assert_eq!(config.export_root(), Path::new("/tmp/seospider-exports"));
    assert_eq!(config.data_dir(), Path::new("/tmp/seospider-data"));
}

#[test]
fn test_builder_optional_fields_have_defaults() {
    let config = BrokerConfig::builder()
        .tool_path("/opt/seospider/launcher")
        .export_root("/tmp/seospider-exports")
        .data_dir("/tmp/seospider-data")
        .build()
        .unwrap();

    assert_eq!(config.export_ttl(), Duration::from_secs(3600));
    assert_eq!(config.max_concurrent_crawls(), 2);
    assert_eq!(config.max_active_exports(), 10);
    assert_eq!(config.max_crawl_size(), 100_000);
    assert_eq!(config.export_timeout(), Duration::from_secs(300));
    assert_eq!(config.admin_timeout(), Duration::from_secs(60));
    assert_eq!(config.probe_timeout(), Duration::from_secs(30));
    assert_eq!(config.lock_probe_program(), Path::new("pgrep"));
    assert_eq!(config.lock_probe_timeout(), Duration::from_secs(5));
    assert!(config.default_export_tabs().starts_with("Internal:All,"));
}

#[test]
fn test_builder_setters_can_be_called_before_tool_path() {
    let config = BrokerConfig::builder()
        .max_concurrent_crawls(4)
        .export_ttl(Duration::from_secs(60))
        .tool_path("/opt/seospider/launcher")
        .max_active_exports(3)
        .export_root("/tmp/x")
        .data_dir("/tmp/y")
        .build()
        .unwrap();

    assert_eq!(config.max_concurrent_crawls(), 4);
    assert_eq!(config.max_active_exports(), 3);
    assert_eq!(config.export_ttl(), Duration::from_secs(60));
}

#[test]
fn test_builder_rejects_zero_limits() {
    let zero_exports = BrokerConfig::builder()
        .tool_path("/opt/seospider/launcher")
        .export_root("/tmp/x")
        .data_dir("/tmp/y")
        .max_active_exports(0)
        .build();
    assert!(matches!(zero_exports, Err(BrokerError::Validation(_))));

    let zero_ttl = BrokerConfig::builder()
        .tool_path("/opt/seospider/launcher")
        .export_root("/tmp/x")
        .data_dir("/tmp/y")
        .export_ttl(Duration::ZERO)
        .build();
    assert!(matches!(zero_ttl, Err(BrokerError::Validation(_))));
}
