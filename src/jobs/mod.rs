//! Crawl job tracking
//!
//! A job is one long-running `--crawl` child process. The tracker owns every
//! child handle, caps how many run at once, and caches each terminal result so
//! repeated polls agree.

pub mod tracker;
pub mod types;

pub use tracker::JobTracker;
pub use types::{CrawlOptions, JobOutcome, JobSnapshot, SubmittedJob};
