//! Crawl job registry with a concurrency ceiling
//!
//! Every job sits behind its own `tokio::sync::Mutex` inside the registry map.
//! Lock order is always registry first, then job; nothing holds a job lock
//! while taking the registry lock.

use super::types::{CrawlOptions, JobOutcome, JobSnapshot, SubmittedJob};
use crate::config::BrokerConfig;
use crate::error::{BrokerError, BrokerResult, CapacityKind};
use crate::lock_detector::LockDetector;
use crate::security::{validate_config_file, validate_url};
use crate::tool::{ToolCli, ToolCommand};
use crate::utils::{
    CRAWL_FAILURE_TAIL_LINES, MAX_CAPTURED_OUTPUT_BYTES, generate_token, output_tail,
};
use std::collections::HashMap;
use std::process::ExitStatus;
use std::sync::{Arc, PoisonError};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const LOG_TARGET: &str = "seospider::jobs";

/// Initial capacity for the job registry
const JOB_REGISTRY_INITIAL_CAPACITY: usize = 8;

/// Read size for output capture
const CAPTURE_CHUNK_BYTES: usize = 8 * 1024;

/// Background reader that keeps the most recent output of one stream
struct StreamCapture {
    buffer: Arc<std::sync::Mutex<Vec<u8>>>,
    task: JoinHandle<()>,
}

impl StreamCapture {
    fn spawn<R>(stream: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buffer = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);

        let task = tokio::spawn(async move {
            let Some(mut stream) = stream else { return };
            let mut chunk = vec![0u8; CAPTURE_CHUNK_BYTES];
            loop {
                match stream.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        let mut buf = sink.lock().unwrap_or_else(PoisonError::into_inner);
                        buf.extend_from_slice(&chunk[..n]);
                        if buf.len() > MAX_CAPTURED_OUTPUT_BYTES * 2 {
                            let excess = buf.len() - MAX_CAPTURED_OUTPUT_BYTES;
                            buf.drain(..excess);
                        }
                    }
                }
            }
        });

        Self { buffer, task }
    }

    /// Wait for the stream to close (until `deadline`) and take what was captured
    async fn finish(mut self, deadline: tokio::time::Instant) -> Vec<u8> {
        if tokio::time::timeout_at(deadline, &mut self.task).await.is_err() {
            // A grandchild still holds the pipe open.
            self.task.abort();
        }
        let mut buf = std::mem::take(&mut *self.buffer.lock().unwrap_or_else(PoisonError::into_inner));
        if buf.len() > MAX_CAPTURED_OUTPUT_BYTES {
            let excess = buf.len() - MAX_CAPTURED_OUTPUT_BYTES;
            buf.drain(..excess);
        }
        buf
    }
}

struct RunningProcess {
    child: Child,
    stdout: StreamCapture,
    stderr: StreamCapture,
}

impl RunningProcess {
    /// stdout followed by stderr, lossily decoded
    async fn collect_output(self, drain_timeout: Duration) -> String {
        let RunningProcess {
            child,
            stdout,
            stderr,
        } = self;
        drop(child);

        let deadline = tokio::time::Instant::now() + drain_timeout;
        let out = stdout.finish(deadline).await;
        let err = stderr.finish(deadline).await;

        let mut combined = String::from_utf8_lossy(&out).into_owned();
        combined.push_str(&String::from_utf8_lossy(&err));
        combined
    }
}

enum JobProcess {
    Running(RunningProcess),
    Finished {
        outcome: JobOutcome,
        finished_at: Instant,
    },
}

struct Job {
    url: String,
    label: String,
    pid: Option<u32>,
    started: Instant,
    process: JobProcess,
    /// A terminal snapshot has been handed to a caller
    reported: bool,
}

impl Job {
    fn is_running(&self) -> bool {
        matches!(self.process, JobProcess::Running(_))
    }

    /// Non-blocking liveness check; on exit, drain output and cache the outcome
    async fn refresh(&mut self, job_id: &str, drain_timeout: Duration) {
        let JobProcess::Running(running) = &mut self.process else {
            return;
        };

        let Some(exit_code) = observed_exit(running.child.try_wait(), job_id) else {
            return;
        };

        let outcome = JobOutcome {
            exit_code,
            summary: None,
            output_tail: None,
            elapsed: self.started.elapsed(),
        };
        let previous = std::mem::replace(
            &mut self.process,
            JobProcess::Finished {
                outcome,
                finished_at: Instant::now(),
            },
        );
        let JobProcess::Running(running) = previous else {
            return;
        };

        let output = running.collect_output(drain_timeout).await;
        if let JobProcess::Finished { outcome, .. } = &mut self.process {
            outcome.summary = summary_line(&output);
            if !outcome.succeeded() {
                outcome.output_tail = Some(output_tail(&output, CRAWL_FAILURE_TAIL_LINES));
            }
            log::info!(
                target: LOG_TARGET,
                "Crawl {job_id} finished with exit code {:?} after {:?}",
                outcome.exit_code,
                outcome.elapsed
            );
        }
    }

    fn is_sweepable(&self, retention: Duration, drop_reported: bool) -> bool {
        match &self.process {
            JobProcess::Running(_) => false,
            JobProcess::Finished { finished_at, .. } => {
                (drop_reported && self.reported) || finished_at.elapsed() >= retention
            }
        }
    }

    fn snapshot(&self, job_id: &str) -> JobSnapshot {
        match &self.process {
            JobProcess::Running(_) => JobSnapshot::Running {
                job_id: job_id.to_string(),
                url: self.url.clone(),
                label: self.label.clone(),
                pid: self.pid,
                elapsed: self.started.elapsed(),
            },
            JobProcess::Finished { outcome, .. } => JobSnapshot::Finished {
                job_id: job_id.to_string(),
                url: self.url.clone(),
                label: self.label.clone(),
                outcome: outcome.clone(),
            },
        }
    }
}

/// Exit code once the child has exited; `None` while it must stay `Running`
///
/// A failed status query keeps the job running: the child is still owned
/// and the next poll asks again.
fn observed_exit(
    status: std::io::Result<Option<ExitStatus>>,
    job_id: &str,
) -> Option<Option<i32>> {
    match status {
        Ok(None) => None,
        Ok(Some(status)) => Some(status.code()),
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Failed to query crawl {job_id}: {e}");
            None
        }
    }
}

/// Last output line that reports crawled URLs or crawl completion
fn summary_line(output: &str) -> Option<String> {
    output
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            lower.contains("urls crawled") || lower.contains("crawl complete")
        })
        .last()
        .map(|line| line.trim().to_string())
}

/// Owner of every crawl child process
pub struct JobTracker {
    tool: ToolCli,
    lock_detector: LockDetector,
    max_concurrent: usize,
    max_crawl_size: u64,
    retention: Duration,
    drain_timeout: Duration,
    jobs: Mutex<HashMap<String, Arc<Mutex<Job>>>>,
}

impl JobTracker {
    #[must_use]
    pub fn new(tool: ToolCli, lock_detector: LockDetector, config: &BrokerConfig) -> Self {
        Self {
            tool,
            lock_detector,
            max_concurrent: config.max_concurrent_crawls(),
            max_crawl_size: config.max_crawl_size(),
            retention: config.job_retention(),
            drain_timeout: config.output_drain_timeout(),
            jobs: Mutex::new(HashMap::with_capacity(JOB_REGISTRY_INITIAL_CAPACITY)),
        }
    }

    /// Validate, check the lock and the ceiling, then spawn a crawl
    ///
    /// # Errors
    ///
    /// `Validation` for a rejected URL or option, `ToolUnavailable`,
    /// `ResourceLocked`, or `CapacityExceeded`. Nothing is spawned on error.
    pub async fn submit(&self, url: &str, options: CrawlOptions) -> BrokerResult<SubmittedJob> {
        let parsed = validate_url(url)?;

        let config = match options.config_file.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => Some(validate_config_file(path)?),
            _ => None,
        };

        let max_crawl_size = options.max_urls.filter(|&n| n > 0);
        if max_crawl_size.is_some_and(|max| max > self.max_crawl_size) {
            return Err(BrokerError::Validation(format!(
                "max_urls cannot exceed {}.",
                self.max_crawl_size
            )));
        }

        let label = options
            .label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| parsed.host_str().unwrap_or_default().to_string());

        self.tool.ensure_available()?;

        if self.lock_detector.is_front_end_running().await {
            return Err(BrokerError::ResourceLocked);
        }

        self.sweep().await;

        let mut jobs = self.jobs.lock().await;
        let mut running = 0;
        for job in jobs.values() {
            if job.lock().await.is_running() {
                running += 1;
            }
        }
        if running >= self.max_concurrent {
            log::info!(
                target: LOG_TARGET,
                "Rejecting crawl of {}: {running} of {} slots busy",
                parsed,
                self.max_concurrent
            );
            return Err(BrokerError::CapacityExceeded {
                kind: CapacityKind::Crawls,
                limit: self.max_concurrent,
            });
        }

        let job_id = generate_token("crawl", |t| jobs.contains_key(t));
        let cmd = ToolCommand::Crawl {
            url: parsed.to_string(),
            config,
            max_crawl_size,
        };

        let mut child = self.tool.spawn_detached(&cmd)?;
        let pid = child.id();
        let stdout = StreamCapture::spawn(child.stdout.take());
        let stderr = StreamCapture::spawn(child.stderr.take());

        let job = Job {
            url: parsed.to_string(),
            label: label.clone(),
            pid,
            started: Instant::now(),
            process: JobProcess::Running(RunningProcess {
                child,
                stdout,
                stderr,
            }),
            reported: false,
        };
        jobs.insert(job_id.clone(), Arc::new(Mutex::new(job)));

        log::info!(
            target: LOG_TARGET,
            "Started crawl {job_id} (pid {pid:?}) for {parsed}"
        );

        Ok(SubmittedJob {
            job_id,
            pid,
            url: parsed.to_string(),
            label,
        })
    }

    /// Current state of one job
    ///
    /// A terminal job is left registered; repeated polls return the same
    /// cached outcome.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown token, listing the known ones.
    pub async fn poll(&self, job_id: &str) -> BrokerResult<JobSnapshot> {
        let job = self.jobs.lock().await.get(job_id).cloned();
        let Some(job) = job else {
            return Err(BrokerError::NotFound {
                what: "crawl job",
                name: job_id.to_string(),
                available: self.job_ids().await,
            });
        };

        let mut job = job.lock().await;
        job.refresh(job_id, self.drain_timeout).await;
        let snapshot = job.snapshot(job_id);
        if !snapshot.is_running() {
            job.reported = true;
        }
        Ok(snapshot)
    }

    /// Refresh every job and drop terminal ones already reported or past
    /// the retention window. Returns how many were removed.
    pub async fn sweep(&self) -> usize {
        self.sweep_where(true).await
    }

    /// Drop only terminal jobs past the retention window
    ///
    /// Used by the periodic cleanup, so a reported job stays queryable until
    /// the next submission or until its retention runs out.
    pub async fn sweep_stale(&self) -> usize {
        self.sweep_where(false).await
    }

    async fn sweep_where(&self, drop_reported: bool) -> usize {
        let entries: Vec<(String, Arc<Mutex<Job>>)> = self
            .jobs
            .lock()
            .await
            .iter()
            .map(|(id, job)| (id.clone(), Arc::clone(job)))
            .collect();

        let mut expired = Vec::new();
        for (job_id, job) in entries {
            let mut job = job.lock().await;
            job.refresh(&job_id, self.drain_timeout).await;
            if job.is_sweepable(self.retention, drop_reported) {
                expired.push(job_id);
            }
        }

        if expired.is_empty() {
            return 0;
        }

        let mut jobs = self.jobs.lock().await;
        for job_id in &expired {
            jobs.remove(job_id);
            log::debug!(target: LOG_TARGET, "Swept finished crawl {job_id}");
        }
        expired.len()
    }

    /// Registered job tokens, sorted
    pub async fn job_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.jobs.lock().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}
