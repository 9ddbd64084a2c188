//! Top-level handle wiring the Tool, the lock detector and both registries

use crate::config::{BrokerConfig, prepare_export_root};
use crate::error::{BrokerError, BrokerResult};
use crate::exports::{ExportManager, SweepReport};
use crate::jobs::JobTracker;
use crate::lock_detector::LockDetector;
use crate::security::validate_db_id;
use crate::storage::{StorageSummary, summarize};
use crate::tool::{CrawlListing, DeleteOutcome, ToolCli, ToolInfo};
use std::sync::Arc;
use std::time::Duration;

/// Interval of the background eviction loop
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared broker state
///
/// Wrap in `Arc` and share across request tasks; every registry inside
/// serializes its own mutations.
pub struct Broker {
    config: BrokerConfig,
    tool: ToolCli,
    lock_detector: LockDetector,
    jobs: JobTracker,
    exports: ExportManager,
}

impl Broker {
    #[must_use]
    pub fn new(config: BrokerConfig) -> Self {
        let tool = ToolCli::new(config.tool_path());
        let lock_detector = LockDetector::from_config(&config);
        let jobs = JobTracker::new(tool.clone(), lock_detector.clone(), &config);
        let exports = ExportManager::new(tool.clone(), lock_detector.clone(), &config);
        Self {
            config,
            tool,
            lock_detector,
            jobs,
            exports,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    #[must_use]
    pub fn jobs(&self) -> &JobTracker {
        &self.jobs
    }

    #[must_use]
    pub fn exports(&self) -> &ExportManager {
        &self.exports
    }

    /// Create the export root and run the first eviction pass
    ///
    /// # Errors
    ///
    /// `Io` if the export root cannot be created.
    pub async fn startup(&self) -> BrokerResult<SweepReport> {
        prepare_export_root(self.config.export_root())?;
        self.exports.sweep_expired().await
    }

    /// Probe the launcher for version and licence
    ///
    /// # Errors
    ///
    /// `ToolUnavailable` or `Timeout`.
    pub async fn check_tool(&self) -> BrokerResult<ToolInfo> {
        self.tool.probe(self.config.probe_timeout()).await
    }

    /// List saved crawls; read-only, so no lock check
    ///
    /// # Errors
    ///
    /// `ToolUnavailable` or `Timeout`.
    pub async fn list_crawls(&self) -> BrokerResult<CrawlListing> {
        self.tool.list_crawls(self.config.admin_timeout()).await
    }

    /// Delete a saved crawl from the Tool's database
    ///
    /// # Errors
    ///
    /// `Validation`, `ToolUnavailable`, `ResourceLocked` or `Timeout`.
    pub async fn delete_crawl(&self, db_id: &str) -> BrokerResult<DeleteOutcome> {
        let db_id = db_id.trim();
        validate_db_id(db_id)?;
        self.tool.ensure_available()?;
        if self.lock_detector.is_front_end_running().await {
            return Err(BrokerError::ResourceLocked);
        }

        let outcome = self
            .tool
            .delete_crawl(db_id, self.config.admin_timeout())
            .await?;
        tracing::info!(db_id, deleted = matches!(outcome, DeleteOutcome::Deleted), "Delete crawl");
        Ok(outcome)
    }

    /// Measure the Tool's data directory and the export root
    ///
    /// # Errors
    ///
    /// `Internal` if the blocking task panics.
    pub async fn storage_summary(&self) -> BrokerResult<StorageSummary> {
        let data_dir = self.config.data_dir().to_path_buf();
        let export_root = self.config.export_root().to_path_buf();
        Ok(tokio::task::spawn_blocking(move || summarize(&data_dir, &export_root)).await?)
    }

    /// Start background cleanup task (call once at initialization)
    ///
    /// Spawns a tokio task that every 60 seconds drops finished jobs past
    /// their retention window and sweeps expired exports. Reported jobs are
    /// left for the sweep before the next crawl admission.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            // The first tick completes immediately; startup already swept.
            interval.tick().await;
            loop {
                interval.tick().await;
                self.jobs.sweep_stale().await;
                if let Err(e) = self.exports.sweep_expired().await {
                    tracing::warn!(error = %e, "Periodic export sweep failed");
                }
            }
        });
    }
}
