//! Crawl job types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Caller-supplied crawl options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlOptions {
    /// Human label; defaults to the URL's host
    #[serde(default)]
    pub label: Option<String>,

    /// Path to a `.seospiderconfig` file
    #[serde(default)]
    pub config_file: Option<String>,

    /// Upper bound on crawled URLs
    #[serde(default)]
    pub max_urls: Option<u64>,
}

/// Returned once a crawl has been accepted and spawned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedJob {
    pub job_id: String,
    pub pid: Option<u32>,
    pub url: String,
    pub label: String,
}

/// Terminal result of a crawl, cached on first observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub exit_code: Option<i32>,
    /// Last line reporting crawled URLs or crawl completion
    pub summary: Option<String>,
    /// Trailing output lines, only kept for failures
    pub output_tail: Option<String>,
    /// Wall time from spawn until the exit was observed
    pub elapsed: Duration,
}

impl JobOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Point-in-time view of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSnapshot {
    Running {
        job_id: String,
        url: String,
        label: String,
        pid: Option<u32>,
        elapsed: Duration,
    },
    Finished {
        job_id: String,
        url: String,
        label: String,
        outcome: JobOutcome,
    },
}

impl JobSnapshot {
    #[must_use]
    pub fn job_id(&self) -> &str {
        match self {
            JobSnapshot::Running { job_id, .. } | JobSnapshot::Finished { job_id, .. } => job_id,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, JobSnapshot::Running { .. })
    }
}
