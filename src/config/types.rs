//! Core configuration type for the broker

use std::path::PathBuf;
use std::time::Duration;

/// Every tunable the broker reads at runtime
///
/// Built once at startup and shared read-only by the job tracker, the export
/// manager and the gateway.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Absolute path of the SEO Spider launcher
    pub(crate) tool_path: PathBuf,

    /// Trusted root for ephemeral export directories.
    ///
    /// **INVARIANT:** Created owner-only at startup; every export directory
    /// lives directly under it.
    pub(crate) export_root: PathBuf,

    /// The Tool's own database directory. Only measured, never written.
    pub(crate) data_dir: PathBuf,

    pub(crate) export_ttl: Duration,
    pub(crate) max_concurrent_crawls: usize,
    pub(crate) max_active_exports: usize,
    pub(crate) max_crawl_size: u64,
    pub(crate) export_timeout: Duration,
    pub(crate) admin_timeout: Duration,
    pub(crate) probe_timeout: Duration,

    /// Program used to query the process table (`pgrep` by default)
    pub(crate) lock_probe_program: PathBuf,
    pub(crate) lock_probe_pattern: String,
    pub(crate) lock_probe_timeout: Duration,

    pub(crate) default_export_tabs: String,

    /// Finished jobs nobody has polled are dropped after this long
    pub(crate) job_retention: Duration,
    pub(crate) output_drain_timeout: Duration,
}
