//! Type-safe builder for `BrokerConfig` using the typestate pattern
//!
//! `build()` only exists once a Tool path has been supplied.

use crate::error::{BrokerError, BrokerResult};
use crate::utils::{
    ADMIN_TIMEOUT, DEFAULT_EXPORT_TABS, EXPORT_TIMEOUT, EXPORT_TTL, FRONT_END_PROCESS_PATTERN,
    JOB_RETENTION, LOCK_PROBE_TIMEOUT, MAX_ACTIVE_EXPORTS, MAX_CONCURRENT_CRAWLS, MAX_CRAWL_SIZE,
    OUTPUT_DRAIN_TIMEOUT, PROBE_TIMEOUT,
};
use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use super::types::BrokerConfig;

// Type states for the builder
pub struct WithToolPath;

pub struct BrokerConfigBuilder<State = ()> {
    pub(crate) tool_path: Option<PathBuf>,
    pub(crate) export_root: Option<PathBuf>,
    pub(crate) data_dir: Option<PathBuf>,
    pub(crate) export_ttl: Duration,
    pub(crate) max_concurrent_crawls: usize,
    pub(crate) max_active_exports: usize,
    pub(crate) max_crawl_size: u64,
    pub(crate) export_timeout: Duration,
    pub(crate) admin_timeout: Duration,
    pub(crate) probe_timeout: Duration,
    pub(crate) lock_probe_program: PathBuf,
    pub(crate) lock_probe_pattern: String,
    pub(crate) lock_probe_timeout: Duration,
    pub(crate) default_export_tabs: String,
    pub(crate) job_retention: Duration,
    pub(crate) output_drain_timeout: Duration,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for BrokerConfigBuilder<()> {
    fn default() -> Self {
        Self {
            tool_path: None,
            export_root: None,
            data_dir: None,
            export_ttl: EXPORT_TTL,
            max_concurrent_crawls: MAX_CONCURRENT_CRAWLS,
            max_active_exports: MAX_ACTIVE_EXPORTS,
            max_crawl_size: MAX_CRAWL_SIZE,
            export_timeout: EXPORT_TIMEOUT,
            admin_timeout: ADMIN_TIMEOUT,
            probe_timeout: PROBE_TIMEOUT,
            lock_probe_program: PathBuf::from("pgrep"),
            lock_probe_pattern: FRONT_END_PROCESS_PATTERN.to_string(),
            lock_probe_timeout: LOCK_PROBE_TIMEOUT,
            default_export_tabs: DEFAULT_EXPORT_TABS.to_string(),
            job_retention: JOB_RETENTION,
            output_drain_timeout: OUTPUT_DRAIN_TIMEOUT,
            _phantom: PhantomData,
        }
    }
}

impl BrokerConfig {
    /// Create a builder for configuring a `BrokerConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> BrokerConfigBuilder<()> {
        BrokerConfigBuilder::default()
    }
}

impl BrokerConfigBuilder<()> {
    pub fn tool_path(self, path: impl Into<PathBuf>) -> BrokerConfigBuilder<WithToolPath> {
        BrokerConfigBuilder {
            tool_path: Some(path.into()),
            export_root: self.export_root,
            data_dir: self.data_dir,
            export_ttl: self.export_ttl,
            max_concurrent_crawls: self.max_concurrent_crawls,
            max_active_exports: self.max_active_exports,
            max_crawl_size: self.max_crawl_size,
            export_timeout: self.export_timeout,
            admin_timeout: self.admin_timeout,
            probe_timeout: self.probe_timeout,
            lock_probe_program: self.lock_probe_program,
            lock_probe_pattern: self.lock_probe_pattern,
            lock_probe_timeout: self.lock_probe_timeout,
            default_export_tabs: self.default_export_tabs,
            job_retention: self.job_retention,
            output_drain_timeout: self.output_drain_timeout,
            _phantom: PhantomData,
        }
    }
}

impl BrokerConfigBuilder<WithToolPath> {
    /// Validate limits and produce the final config
    ///
    /// # Errors
    ///
    /// Returns `BrokerError::Validation` when a ceiling or timeout is zero.
    pub fn build(self) -> BrokerResult<BrokerConfig> {
        let tool_path = self
            .tool_path
            .ok_or_else(|| BrokerError::Validation("tool_path is required".to_string()))?;

        if self.max_concurrent_crawls == 0 {
            return Err(BrokerError::Validation(
                "max_concurrent_crawls must be at least 1".to_string(),
            ));
        }
        if self.max_active_exports == 0 {
            return Err(BrokerError::Validation(
                "max_active_exports must be at least 1".to_string(),
            ));
        }
        if self.export_ttl.is_zero() || self.export_timeout.is_zero() {
            return Err(BrokerError::Validation(
                "export_ttl and export_timeout must be non-zero".to_string(),
            ));
        }

        let export_root = match self.export_root {
            Some(root) => root,
            None => super::env::default_export_root()?,
        };
        let data_dir = match self.data_dir {
            Some(dir) => dir,
            None => super::env::default_data_dir()?,
        };

        Ok(BrokerConfig {
            tool_path,
            export_root,
            data_dir,
            export_ttl: self.export_ttl,
            max_concurrent_crawls: self.max_concurrent_crawls,
            max_active_exports: self.max_active_exports,
            max_crawl_size: self.max_crawl_size,
            export_timeout: self.export_timeout,
            admin_timeout: self.admin_timeout,
            probe_timeout: self.probe_timeout,
            lock_probe_program: self.lock_probe_program,
            lock_probe_pattern: self.lock_probe_pattern,
            lock_probe_timeout: self.lock_probe_timeout,
            default_export_tabs: self.default_export_tabs,
            job_retention: self.job_retention,
            output_drain_timeout: self.output_drain_timeout,
        })
    }
}
