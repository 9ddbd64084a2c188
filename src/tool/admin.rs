//! Probe, list and delete commands and the parsing of their output

use super::{ToolCli, ToolCommand};
use crate::error::BrokerResult;
use crate::utils::{DELETE_FAILURE_TAIL_LINES, output_tail};
use std::time::Duration;

/// Startup log noise printed by the launcher before any crawl listing
const LIST_NOISE: &[&str] = &[
    "INFO  -",
    "WARNING:",
    "com.sun.",
    "Lock File",
    "font",
    "proxy",
    "Signature",
    "License",
    "Running:",
    "Platform",
    "Java Info",
    "VM args",
    "Log File",
    "Fatal Log",
    "Logging Status",
    "Memory:",
    "Licence",
    "Locale:",
    "Time Zone",
    "Checking Licence",
    "antialias",
    "SfRoboto",
];

/// Raw-output fallback is cut to this many trailing characters
const RAW_LISTING_CHARS: usize = 3000;

/// Version and licence reported by the launcher's startup log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub version: String,
    pub licence_status: String,
}

impl ToolInfo {
    /// Pick `Running: ` and `Licence Status: ` values out of probe output
    #[must_use]
    pub fn parse(output: &str) -> Self {
        let mut version = None;
        let mut licence_status = None;

        for line in output.lines() {
            if let Some((_, rest)) = line.rsplit_once("Running: ") {
                version = Some(rest.trim().to_string());
            }
            if let Some((_, rest)) = line.rsplit_once("Licence Status: ") {
                licence_status = Some(rest.trim().to_string());
            }
        }

        Self {
            version: version.unwrap_or_else(|| "unknown".to_string()),
            licence_status: licence_status.unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

/// Saved crawls as recovered from `--list-crawls`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlListing {
    /// Lines left after dropping startup noise
    Crawls(Vec<String>),
    /// Only lines that mention a database id
    DatabaseLines(Vec<String>),
    /// Tail of the unparsed output
    Raw(String),
}

impl CrawlListing {
    #[must_use]
    pub fn parse(output: &str) -> Self {
        let crawls: Vec<String> = output
            .lines()
            .filter(|line| !LIST_NOISE.iter().any(|noise| line.contains(noise)))
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        if !crawls.is_empty() {
            return CrawlListing::Crawls(crawls);
        }

        let db_lines: Vec<String> = output
            .lines()
            .filter(|line| line.contains("Database Id") || line.to_lowercase().contains("database"))
            .map(|line| line.trim().to_string())
            .collect();
        if !db_lines.is_empty() {
            return CrawlListing::DatabaseLines(db_lines);
        }

        let skip = output.chars().count().saturating_sub(RAW_LISTING_CHARS);
        CrawlListing::Raw(output.chars().skip(skip).collect())
    }
}

/// Result of `--delete-crawl`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Non-zero exit; the Tool does not say whether anything was removed
    MayHaveFailed {
        exit_code: Option<i32>,
        output_tail: String,
    },
}

impl ToolCli {
    /// Run the `--help` probe and report version and licence
    ///
    /// # Errors
    ///
    /// `ToolUnavailable` or `Timeout`.
    pub async fn probe(&self, limit: Duration) -> BrokerResult<ToolInfo> {
        let output = self.run(&ToolCommand::Probe, limit).await?;
        Ok(ToolInfo::parse(&output.combined()))
    }

    /// List crawls saved in the Tool's database
    ///
    /// # Errors
    ///
    /// `ToolUnavailable` or `Timeout`.
    pub async fn list_crawls(&self, limit: Duration) -> BrokerResult<CrawlListing> {
        let output = self.run(&ToolCommand::ListCrawls, limit).await?;
        Ok(CrawlListing::parse(&output.combined()))
    }

    /// Delete one saved crawl; `db_id` must already be validated
    ///
    /// # Errors
    ///
    /// `ToolUnavailable` or `Timeout`.
    pub async fn delete_crawl(&self, db_id: &str, limit: Duration) -> BrokerResult<DeleteOutcome> {
        let cmd = ToolCommand::DeleteCrawl {
            db_id: db_id.to_string(),
        };
        let output = self.run(&cmd, limit).await?;
        if output.success() {
            return Ok(DeleteOutcome::Deleted);
        }
        Ok(DeleteOutcome::MayHaveFailed {
            exit_code: output.exit_code,
            output_tail: output_tail(&output.combined(), DELETE_FAILURE_TAIL_LINES),
        })
    }
}
