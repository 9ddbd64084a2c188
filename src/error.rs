//! Error types for broker operations
//!
//! Every failure a caller can observe maps onto one `BrokerError` variant.
//! Rejections raised before a process is spawned or a path is touched carry
//! the validator's reason verbatim.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for broker operations
pub type BrokerResult<T> = Result<T, BrokerError>;

/// Which ceiling rejected a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityKind {
    /// Concurrent crawl jobs
    Crawls,
    /// Live export directories
    Exports,
}

impl std::fmt::Display for CapacityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapacityKind::Crawls => f.write_str("concurrent crawls"),
            CapacityKind::Exports => f.write_str("active exports"),
        }
    }
}

/// Error types for broker operations
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Malformed or unsafe input; nothing was spawned or created
    #[error("{0}")]
    Validation(String),

    /// The interactive front-end currently holds the crawl database
    #[error(
        "SEO Spider GUI is already running. The headless CLI cannot access the crawl \
         database while the GUI has it locked"
    )]
    ResourceLocked,

    /// A concurrency or population ceiling was reached
    #[error("Maximum {limit} {kind} reached")]
    CapacityExceeded { kind: CapacityKind, limit: usize },

    /// Unknown token or missing file
    #[error("{what} not found: {name}")]
    NotFound {
        what: &'static str,
        name: String,
        /// Tokens or files the caller may retry with
        available: Vec<String>,
    },

    /// The Tool exited with a non-zero status
    #[error("Tool exited with code {}", exit_code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    ExportFailed {
        exit_code: Option<i32>,
        output_tail: String,
    },

    /// A bounded wait on the Tool elapsed
    #[error("{operation} timed out after {}s", limit.as_secs())]
    Timeout {
        operation: &'static str,
        limit: Duration,
        /// Export token left registered for inspection, if any
        export_id: Option<String>,
    },

    /// The Tool exited cleanly without writing a single CSV, which is what an
    /// unknown database id looks like
    #[error("Export {export_id} completed but no CSV files were generated")]
    NoCsvOutput { export_id: String, db_id: String },

    /// The export succeeded but every produced file has zero data rows
    #[error("Export {export_id} produced {file_count} file(s) with no data rows")]
    EmptyResult {
        export_id: String,
        db_id: String,
        file_count: usize,
        /// Whether the front-end was seen running after the export finished
        front_end_running: bool,
    },

    /// Executable missing or unresponsive
    #[error("SEO Spider CLI unavailable: {0}")]
    ToolUnavailable(String),

    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal fault
    #[error("{0}")]
    Internal(String),
}

impl BrokerError {
    /// Stable label for logs and gateway responses
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            BrokerError::Validation(_) => "validation_error",
            BrokerError::ResourceLocked => "resource_locked",
            BrokerError::CapacityExceeded { .. } => "capacity_exceeded",
            BrokerError::NotFound { .. } => "not_found",
            BrokerError::ExportFailed { .. } => "export_failed",
            BrokerError::Timeout { .. } => "timeout",
            BrokerError::NoCsvOutput { .. } => "no_csv_output",
            BrokerError::EmptyResult { .. } => "empty_result",
            BrokerError::ToolUnavailable(_) => "tool_unavailable",
            BrokerError::Io(_) => "io_error",
            BrokerError::Internal(_) => "internal_error",
        }
    }

    /// Check if the caller may succeed by retrying later
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BrokerError::ResourceLocked
                | BrokerError::CapacityExceeded { .. }
                | BrokerError::Timeout { .. }
                | BrokerError::EmptyResult { .. }
        )
    }
}

impl From<tokio::task::JoinError> for BrokerError {
    fn from(error: tokio::task::JoinError) -> Self {
        BrokerError::Internal(format!("background task failed: {error}"))
    }
}
