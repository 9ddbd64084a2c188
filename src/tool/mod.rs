//! External Tool invocation
//!
//! `ToolCli` owns the launcher path and runs one-shot commands with a bounded
//! wait. Long-running crawls are spawned through `ToolCli::spawn` and handed to
//! the job tracker instead.

pub mod admin;
pub mod command;

pub use admin::{CrawlListing, DeleteOutcome, ToolInfo};
pub use command::ToolCommand;

use crate::error::{BrokerError, BrokerResult};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};

/// Captured result of a finished Tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// stdout followed by stderr
    #[must_use]
    pub fn combined(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len());
        out.push_str(&self.stdout);
        out.push_str(&self.stderr);
        out
    }
}

/// Handle on the Tool launcher
#[derive(Debug, Clone)]
pub struct ToolCli {
    path: PathBuf,
}

impl ToolCli {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Per-operation precondition: the launcher must exist
    ///
    /// # Errors
    ///
    /// Returns `BrokerError::ToolUnavailable` if the path does not exist.
    pub fn ensure_available(&self) -> BrokerResult<()> {
        if self.path.exists() {
            Ok(())
        } else {
            Err(BrokerError::ToolUnavailable(format!(
                "launcher not found at {}",
                self.path.display()
            )))
        }
    }

    fn command(&self, cmd: &ToolCommand, kill_on_drop: bool) -> Command {
        let mut command = Command::new(&self.path);
        command
            .args(cmd.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(kill_on_drop);
        command
    }

    fn start(&self, cmd: &ToolCommand, kill_on_drop: bool) -> BrokerResult<Child> {
        self.ensure_available()?;
        self.command(cmd, kill_on_drop).spawn().map_err(|e| {
            tracing::error!(error = %e, operation = cmd.operation(), "Failed to spawn Tool");
            BrokerError::ToolUnavailable(format!("failed to start {}: {e}", cmd.operation()))
        })
    }

    /// Start `cmd` without waiting for it
    ///
    /// The child is not tied to the returned handle: dropping the handle, or
    /// the whole broker, leaves it running so a crawl still reaches its save.
    ///
    /// # Errors
    ///
    /// `ToolUnavailable` if the launcher is missing or cannot be executed.
    pub fn spawn_detached(&self, cmd: &ToolCommand) -> BrokerResult<Child> {
        self.start(cmd, false)
    }

    /// Run `cmd` to completion, waiting at most `limit`
    ///
    /// On timeout the child is killed (it is dropped with `kill_on_drop`).
    ///
    /// # Errors
    ///
    /// `ToolUnavailable` if the launcher cannot be started, `Timeout` if the
    /// wait elapses, `Io` if collecting output fails.
    pub async fn run(&self, cmd: &ToolCommand, limit: Duration) -> BrokerResult<ToolOutput> {
        let child = self.start(cmd, true)?;
        let started = std::time::Instant::now();

        tracing::debug!(
            operation = cmd.operation(),
            pid = ?child.id(),
            timeout_secs = limit.as_secs(),
            "Tool started"
        );

        let output = tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::warn!(
                    operation = cmd.operation(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Tool timed out, child killed"
                );
                BrokerError::Timeout {
                    operation: cmd.operation(),
                    limit,
                    export_id: None,
                }
            })??;

        let output = ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!(
            operation = cmd.operation(),
            exit_code = ?output.exit_code,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Tool finished"
        );

        Ok(output)
    }
}
