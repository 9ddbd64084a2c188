//! Process and resource broker for the SEO Spider command-line Tool
//!
//! Starts crawl jobs, tracks them under a concurrency ceiling, runs bounded
//! exports into TTL-evicted directories, and serves paginated reads of the
//! exported CSV files. Every externally supplied value passes the `security`
//! validators before it reaches a process argument vector or a path.

pub mod broker;
pub mod config;
pub mod error;
pub mod exports;
pub mod gateway;
pub mod jobs;
pub mod lock_detector;
pub mod security;
pub mod storage;
pub mod tool;
pub mod utils;

pub use broker::Broker;
pub use config::{BrokerConfig, prepare_export_root};
pub use error::{BrokerError, BrokerResult, CapacityKind};
pub use exports::{
    ExportManager, ExportRequest, ExportSummary, ExportedFile, Page, ReadRequest, RowFilter,
    SweepReport,
};
pub use jobs::{CrawlOptions, JobOutcome, JobSnapshot, JobTracker, SubmittedJob};
pub use lock_detector::LockDetector;
pub use security::{PathGuard, PathGuardError};
pub use storage::{StorageEntry, StorageSummary};
pub use tool::{CrawlListing, DeleteOutcome, ToolCli, ToolCommand, ToolInfo};
