//! Shared configuration constants for the SEO Spider broker
//!
//! Defaults read by `BrokerConfig` and limits used by the presentation layer.

use std::time::Duration;

/// Default launcher location on macOS installs
pub const DEFAULT_CLI_PATH: &str =
    "/Applications/Screaming Frog SEO Spider.app/Contents/MacOS/ScreamingFrogSEOSpiderLauncher";

/// Substring identifying the interactive front-end in the process table
///
/// The GUI runs as a JVM whose command line references this jar. While it is
/// running the headless CLI cannot open the crawl database.
pub const FRONT_END_PROCESS_PATTERN: &str = "ScreamingFrogSEOSpider.jar";

/// Export directories older than this are deleted by the eviction sweep
pub const EXPORT_TTL: Duration = Duration::from_secs(60 * 60);

/// Maximum crawl jobs in `running` state at once
pub const MAX_CONCURRENT_CRAWLS: usize = 2;

/// Maximum export directories registered at once
pub const MAX_ACTIVE_EXPORTS: usize = 10;

/// Upper bound accepted for a crawl's `max_urls` option
pub const MAX_CRAWL_SIZE: u64 = 100_000;

/// Overall bound on one export invocation
pub const EXPORT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Bound on `--list-crawls` and `--delete-crawl`
pub const ADMIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Bound on the version/help probe
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Bound on the process-table query
pub const LOCK_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a finished job stays queryable when nobody polls it
pub const JOB_RETENTION: Duration = Duration::from_secs(60 * 60);

/// How long to wait for captured output streams to close after the child exits
pub const OUTPUT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Default `--export-tabs` value when the caller gives none
pub const DEFAULT_EXPORT_TABS: &str = "Internal:All,Response Codes:All,Page Titles:All,\
     Meta Description:All,H1:All,H2:All,Images:All,Canonicals:All,Directives:All";

/// Extension required for crawl configuration files
pub const CONFIG_FILE_EXTENSION: &str = "seospiderconfig";

/// Default page size for `read_crawl_data`
pub const DEFAULT_READ_LIMIT: usize = 100;

/// Cells longer than this are shortened for display
pub const MAX_CELL_DISPLAY_CHARS: usize = 80;

/// Bytes of crawl output retained per stream; older output is discarded
pub const MAX_CAPTURED_OUTPUT_BYTES: usize = 1024 * 1024;

/// Lines of output kept when reporting a failed crawl
pub const CRAWL_FAILURE_TAIL_LINES: usize = 20;

/// Lines of output kept when reporting a failed export
pub const EXPORT_FAILURE_TAIL_LINES: usize = 15;

/// Lines of output kept when reporting a failed delete
pub const DELETE_FAILURE_TAIL_LINES: usize = 10;
