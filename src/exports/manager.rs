//! Registry of live export directories
//!
//! Exports are serialized through `export_gate`: the Tool cannot share its
//! database between two headless instances, and holding the gate across the
//! capacity check and the registration keeps the population cap exact.

use super::driver::{ExportDriver, inventory};
use super::eviction;
use super::reader::read_page;
use super::types::{ExportEntry, ExportRequest, ExportSummary, Page, ReadRequest, SweepReport};
use crate::config::{BrokerConfig, prepare_export_root};
use crate::error::{BrokerError, BrokerResult, CapacityKind};
use crate::lock_detector::LockDetector;
use crate::security::{validate_cli_arg, validate_db_id};
use crate::tool::ToolCli;
use crate::utils::{EXPORT_FAILURE_TAIL_LINES, generate_token, output_tail};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::Mutex;

const LOG_TARGET: &str = "seospider::exports";

/// Initial capacity for the export registry
const EXPORT_REGISTRY_INITIAL_CAPACITY: usize = 16;

/// Non-empty, trimmed free-text option
fn option_value(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Create `root/<name>` with owner-only permissions, failing if it exists
fn create_export_dir(root: &Path, name: &str) -> std::io::Result<PathBuf> {
    let path = root.join(name);
    let mut builder = std::fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(&path)?;
    Ok(path)
}

/// Owner of every export directory under the export root
pub struct ExportManager {
    driver: ExportDriver,
    lock_detector: LockDetector,
    root: PathBuf,
    ttl: Duration,
    max_active: usize,
    default_tabs: String,
    exports: Mutex<HashMap<String, ExportEntry>>,
    export_gate: Mutex<()>,
}

impl ExportManager {
    #[must_use]
    pub fn new(tool: ToolCli, lock_detector: LockDetector, config: &BrokerConfig) -> Self {
        Self {
            driver: ExportDriver::new(tool, config.export_timeout()),
            lock_detector,
            root: config.export_root().to_path_buf(),
            ttl: config.export_ttl(),
            max_active: config.max_active_exports(),
            default_tabs: config.default_export_tabs().to_string(),
            exports: Mutex::new(HashMap::with_capacity(EXPORT_REGISTRY_INITIAL_CAPACITY)),
            export_gate: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a saved crawl and export it into a fresh directory
    ///
    /// # Errors
    ///
    /// - `Validation` for a bad identifier or an option starting with `-`
    /// - `ToolUnavailable`, `ResourceLocked`, `CapacityExceeded`
    /// - `ExportFailed` on non-zero exit (directory left for the disk sweep)
    /// - `Timeout` with the registered export token
    /// - `NoCsvOutput` when the Tool wrote no CSV at all (directory registered)
    /// - `EmptyResult` when every CSV has zero data rows (directory registered)
    pub async fn run_export(&self, request: ExportRequest) -> BrokerResult<ExportSummary> {
        let db_id = request.db_id.trim().to_string();
        validate_db_id(&db_id)?;

        let tabs = option_value(request.export_tabs.as_deref());
        let bulk_export = option_value(request.bulk_export.as_deref());
        let save_report = option_value(request.save_report.as_deref());
        for (name, value) in [
            ("export_tabs", tabs),
            ("bulk_export", bulk_export),
            ("save_report", save_report),
        ] {
            if let Some(value) = value {
                validate_cli_arg(value, name)?;
            }
        }
        let tabs = tabs.unwrap_or(self.default_tabs.as_str());

        self.driver.tool().ensure_available()?;

        if self.lock_detector.is_front_end_running().await {
            return Err(BrokerError::ResourceLocked);
        }

        let _gate = self.export_gate.lock().await;

        self.sweep_expired().await?;

        let export_id = {
            let exports = self.exports.lock().await;
            if exports.len() >= self.max_active {
                return Err(BrokerError::CapacityExceeded {
                    kind: CapacityKind::Exports,
                    limit: self.max_active,
                });
            }
            generate_token("export", |t| {
                exports.contains_key(t) || self.root.join(t).symlink_metadata().is_ok()
            })
        };

        if !self.root.is_dir() {
            prepare_export_root(&self.root)?;
        }
        let export_dir = create_export_dir(&self.root, &export_id)?;

        log::info!(
            target: LOG_TARGET,
            "Exporting db {db_id} into {}",
            export_dir.display()
        );

        let output = match self
            .driver
            .run(&db_id, tabs, &export_dir, bulk_export, save_report)
            .await
        {
            Ok(output) => output,
            Err(BrokerError::Timeout {
                operation, limit, ..
            }) => {
                self.register(&export_id, export_dir, &db_id).await;
                return Err(BrokerError::Timeout {
                    operation,
                    limit,
                    export_id: Some(export_id),
                });
            }
            Err(e) => return Err(e),
        };

        if !output.success() {
            log::warn!(
                target: LOG_TARGET,
                "Export {export_id} failed with exit code {:?}",
                output.exit_code
            );
            return Err(BrokerError::ExportFailed {
                exit_code: output.exit_code,
                output_tail: output_tail(&output.combined(), EXPORT_FAILURE_TAIL_LINES),
            });
        }

        let scan_dir = export_dir.clone();
        let files = tokio::task::spawn_blocking(move || inventory(&scan_dir)).await?;
        self.register(&export_id, export_dir, &db_id).await;

        let csv_count = files.iter().filter(|f| f.is_csv()).count();
        let total_data_rows: usize = files.iter().filter_map(|f| f.data_rows).sum();

        if csv_count == 0 {
            log::warn!(
                target: LOG_TARGET,
                "Export {export_id} wrote no CSV files for database {db_id}"
            );
            return Err(BrokerError::NoCsvOutput { export_id, db_id });
        }

        if total_data_rows == 0 {
            let front_end_running = self.lock_detector.is_front_end_running().await;
            log::warn!(
                target: LOG_TARGET,
                "Export {export_id} produced {csv_count} CSV file(s) with no data rows"
            );
            return Err(BrokerError::EmptyResult {
                export_id,
                db_id,
                file_count: csv_count,
                front_end_running,
            });
        }

        log::info!(
            target: LOG_TARGET,
            "Export {export_id} complete: {csv_count} CSV file(s), {total_data_rows} rows"
        );

        Ok(ExportSummary {
            export_id,
            db_id,
            files,
            total_data_rows,
        })
    }

    async fn register(&self, export_id: &str, path: PathBuf, db_id: &str) {
        self.exports.lock().await.insert(
            export_id.to_string(),
            ExportEntry {
                path,
                created_at: Utc::now(),
                db_id: db_id.to_string(),
            },
        );
    }

    /// Read one page from a file of a registered export
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown token, a vanished directory (the stale entry
    /// is purged) or a missing file; see `read_page` for the rest.
    pub async fn read_file(&self, request: ReadRequest) -> BrokerResult<Page> {
        let export_id = request.export_id.trim().to_string();

        let dir = {
            let exports = self.exports.lock().await;
            match exports.get(&export_id) {
                Some(entry) => entry.path.clone(),
                None => {
                    let mut available: Vec<String> = exports.keys().cloned().collect();
                    available.sort();
                    return Err(BrokerError::NotFound {
                        what: "export",
                        name: export_id,
                        available,
                    });
                }
            }
        };

        if !dir.is_dir() {
            self.exports.lock().await.remove(&export_id);
            log::debug!(target: LOG_TARGET, "Purged export {export_id}: directory is gone");
            return Err(BrokerError::NotFound {
                what: "export directory",
                name: export_id,
                available: Vec::new(),
            });
        }

        tokio::task::spawn_blocking(move || read_page(&dir, &request)).await?
    }

    /// Run both eviction passes against the current time
    ///
    /// # Errors
    ///
    /// `Internal` if the blocking sweep task panics.
    pub async fn sweep_expired(&self) -> BrokerResult<SweepReport> {
        self.sweep_expired_at(Utc::now()).await
    }

    /// Run both eviction passes as if the time were `now`
    ///
    /// # Errors
    ///
    /// `Internal` if the blocking sweep task panics.
    pub async fn sweep_expired_at(&self, now: DateTime<Utc>) -> BrokerResult<SweepReport> {
        let (expired, registered) = {
            let mut exports = self.exports.lock().await;
            let expired = eviction::take_expired(&mut exports, now, self.ttl);
            let registered: HashSet<String> = exports.keys().cloned().collect();
            (expired, registered)
        };

        let root = self.root.clone();
        let ttl = self.ttl;
        let report = tokio::task::spawn_blocking(move || {
            eviction::reclaim(&root, expired, &registered, now, ttl)
        })
        .await?;

        if report != SweepReport::default() {
            log::info!(
                target: LOG_TARGET,
                "Eviction: {} expired, {} orphaned, {} symlinks removed",
                report.expired,
                report.orphans,
                report.symlinks
            );
        }
        Ok(report)
    }

    /// Registered export tokens, sorted
    pub async fn export_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.exports.lock().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}
