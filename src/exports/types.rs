//! Export request, inventory and page types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters of one export invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Crawl database identifier from `list_crawls`
    pub db_id: String,
    #[serde(default)]
    pub export_tabs: Option<String>,
    #[serde(default)]
    pub bulk_export: Option<String>,
    #[serde(default)]
    pub save_report: Option<String>,
}

/// One file produced by an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Path relative to the export directory
    pub relative_path: String,
    pub size: u64,
    /// Data rows below the header; `None` for non-CSV files
    pub data_rows: Option<usize>,
}

impl ExportedFile {
    #[must_use]
    pub fn is_csv(&self) -> bool {
        self.data_rows.is_some()
    }
}

/// Successful, non-empty export
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub export_id: String,
    pub db_id: String,
    pub files: Vec<ExportedFile>,
    pub total_data_rows: usize,
}

impl ExportSummary {
    pub fn csv_files(&self) -> impl Iterator<Item = &ExportedFile> {
        self.files.iter().filter(|f| f.is_csv())
    }
}

/// Registry entry for a live export directory
#[derive(Debug, Clone)]
pub(crate) struct ExportEntry {
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub db_id: String,
}

/// Paginated, filtered read of one exported file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadRequest {
    pub export_id: String,
    pub file: String,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub filter_column: Option<String>,
    #[serde(default)]
    pub filter_value: Option<String>,
}

/// Case-insensitive substring filter on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    pub column: String,
    pub value: String,
}

/// Rows selected by a `ReadRequest`
///
/// Cells hold the stored values untouched; display truncation happens when
/// the page is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Resolved file, relative to the export directory
    pub file: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub offset: usize,
    pub limit: usize,
    pub filter: Option<RowFilter>,
    /// Exactly `limit` rows came back, so a next page may exist
    pub has_more: bool,
}

impl Page {
    /// Offset of the following page
    #[must_use]
    pub fn next_offset(&self) -> usize {
        self.offset + self.limit
    }
}

/// Counts from one eviction sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Registered directories past their TTL
    pub expired: usize,
    /// Unregistered directories past their TTL
    pub orphans: usize,
    /// Top-level symlinks unlinked
    pub symlinks: usize,
}
