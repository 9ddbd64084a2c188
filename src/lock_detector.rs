//! Front-end lock detection via the host process table
//!
//! The interactive SEO Spider holds its crawl database exclusively while open.
//! This is an advisory pre-check only: the front-end may start between the
//! check and the Tool opening the database.

use crate::config::BrokerConfig;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Process-table probe for the interactive front-end
#[derive(Debug, Clone)]
pub struct LockDetector {
    program: PathBuf,
    pattern: String,
    timeout: Duration,
}

impl LockDetector {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, pattern: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            pattern: pattern.into(),
            timeout,
        }
    }

    #[must_use]
    pub fn from_config(config: &BrokerConfig) -> Self {
        Self::new(
            config.lock_probe_program(),
            config.lock_probe_pattern(),
            config.lock_probe_timeout(),
        )
    }

    /// Check whether the front-end process is running
    ///
    /// Runs `<program> -f <pattern>`; exit status 0 means a match. A timeout,
    /// spawn failure or any other status counts as not running.
    pub async fn is_front_end_running(&self) -> bool {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-f")
            .arg(&self.pattern)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match tokio::time::timeout(self.timeout, cmd.status()).await {
            Ok(Ok(status)) => {
                let running = status.success();
                if running {
                    tracing::debug!(pattern = %self.pattern, "Front-end process detected");
                }
                running
            }
            Ok(Err(e)) => {
                tracing::debug!(
                    program = %self.program.display(),
                    error = %e,
                    "Lock probe failed to run, assuming front-end is not running"
                );
                false
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Lock probe timed out, assuming front-end is not running"
                );
                false
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_exit_means_running() {
        let detector = LockDetector::new("true", "anything", Duration::from_secs(5));
        assert!(detector.is_front_end_running().await);
    }

    #[tokio::test]
    async fn failures_fail_open() {
        let missing = LockDetector::new("/nonexistent/pgrep", "x", Duration::from_secs(5));
        assert!(!missing.is_front_end_running().await);

        let no_match = LockDetector::new("false", "x", Duration::from_secs(5));
        assert!(!no_match.is_front_end_running().await);
    }
}
