//! Getter methods for `BrokerConfig`

use std::path::Path;
use std::time::Duration;

use super::types::BrokerConfig;

impl BrokerConfig {
    #[must_use]
    pub fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    #[must_use]
    pub fn export_root(&self) -> &Path {
        &self.export_root
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn export_ttl(&self) -> Duration {
        self.export_ttl
    }

    #[must_use]
    pub fn max_concurrent_crawls(&self) -> usize {
        self.max_concurrent_crawls
    }

    #[must_use]
    pub fn max_active_exports(&self) -> usize {
        self.max_active_exports
    }

    #[must_use]
    pub fn max_crawl_size(&self) -> u64 {
        self.max_crawl_size
    }

    #[must_use]
    pub fn export_timeout(&self) -> Duration {
        self.export_timeout
    }

    #[must_use]
    pub fn admin_timeout(&self) -> Duration {
        self.admin_timeout
    }

    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    #[must_use]
    pub fn lock_probe_program(&self) -> &Path {
        &self.lock_probe_program
    }

    #[must_use]
    pub fn lock_probe_pattern(&self) -> &str {
        &self.lock_probe_pattern
    }

    #[must_use]
    pub fn lock_probe_timeout(&self) -> Duration {
        self.lock_probe_timeout
    }

    #[must_use]
    pub fn default_export_tabs(&self) -> &str {
        &self.default_export_tabs
    }

    #[must_use]
    pub fn job_retention(&self) -> Duration {
        self.job_retention
    }

    #[must_use]
    pub fn output_drain_timeout(&self) -> Duration {
        self.output_drain_timeout
    }
}
