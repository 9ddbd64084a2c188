//! Builder methods available for all states
//!
//! Optional settings can be applied before or after the Tool path.

use super::builder::BrokerConfigBuilder;
use std::path::PathBuf;
use std::time::Duration;

impl<State> BrokerConfigBuilder<State> {
    /// Root directory for ephemeral export output
    #[must_use]
    pub fn export_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.export_root = Some(root.into());
        self
    }

    /// The Tool's database directory, used only by the storage summary
    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn export_ttl(mut self, ttl: Duration) -> Self {
        self.export_ttl = ttl;
        self
    }

    #[must_use]
    pub fn max_concurrent_crawls(mut self, limit: usize) -> Self {
        self.max_concurrent_crawls = limit;
        self
    }

    #[must_use]
    pub fn max_active_exports(mut self, limit: usize) -> Self {
        self.max_active_exports = limit;
        self
    }

    #[must_use]
    pub fn max_crawl_size(mut self, limit: u64) -> Self {
        self.max_crawl_size = limit;
        self
    }

    #[must_use]
    pub fn export_timeout(mut self, timeout: Duration) -> Self {
        self.export_timeout = timeout;
        self
    }

    /// Timeout for `--list-crawls` and `--delete-crawl`
    #[must_use]
    pub fn admin_timeout(mut self, timeout: Duration) -> Self {
        self.admin_timeout = timeout;
        self
    }

    #[must_use]
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Program queried for the front-end process
    ///
    /// Invoked as `<program> -f <pattern>`; exit status 0 means "running".
    #[must_use]
    pub fn lock_probe_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.lock_probe_program = program.into();
        self
    }

    #[must_use]
    pub fn lock_probe_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.lock_probe_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn lock_probe_timeout(mut self, timeout: Duration) -> Self {
        self.lock_probe_timeout = timeout;
        self
    }

    #[must_use]
    pub fn default_export_tabs(mut self, tabs: impl Into<String>) -> Self {
        self.default_export_tabs = tabs.into();
        self
    }

    #[must_use]
    pub fn job_retention(mut self, retention: Duration) -> Self {
        self.job_retention = retention;
        self
    }

    #[must_use]
    pub fn output_drain_timeout(mut self, timeout: Duration) -> Self {
        self.output_drain_timeout = timeout;
        self
    }
}
