//! Tool argument grammar
//!
//! Argument vectors are built as discrete elements and handed straight to
//! `execve`; nothing passes through a shell. Values reaching these
//! constructors have already been validated.

use std::ffi::OsString;
use std::path::PathBuf;

const HEADLESS: &str = "--headless";

/// One Tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCommand {
    /// Crawl a site into the Tool's database
    Crawl {
        url: String,
        config: Option<PathBuf>,
        max_crawl_size: Option<u64>,
    },
    /// Enumerate saved crawls
    ListCrawls,
    /// Load a saved crawl and write CSV exports
    Export {
        db_id: String,
        tabs: String,
        output_folder: PathBuf,
        bulk_export: Option<String>,
        save_report: Option<String>,
    },
    /// Remove a saved crawl from the database
    DeleteCrawl { db_id: String },
    /// Version/licence probe
    Probe,
}

impl ToolCommand {
    /// Operation name used in logs and timeout messages
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            ToolCommand::Crawl { .. } => "crawl",
            ToolCommand::ListCrawls => "list crawls",
            ToolCommand::Export { .. } => "export",
            ToolCommand::DeleteCrawl { .. } => "delete crawl",
            ToolCommand::Probe => "probe",
        }
    }

    /// Argument vector, always starting with `--headless`
    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![HEADLESS.into()];

        match self {
            ToolCommand::Crawl {
                url,
                config,
                max_crawl_size,
            } => {
                args.push("--crawl".into());
                args.push(url.into());
                args.push("--save-crawl".into());
                if let Some(config) = config {
                    args.push("--config".into());
                    args.push(config.clone().into_os_string());
                }
                if let Some(size) = max_crawl_size {
                    args.push("--max-crawl-size".into());
                    args.push(size.to_string().into());
                }
            }
            ToolCommand::ListCrawls => args.push("--list-crawls".into()),
            ToolCommand::Export {
                db_id,
                tabs,
                output_folder,
                bulk_export,
                save_report,
            } => {
                args.push("--load-crawl".into());
                args.push(db_id.into());
                args.push("--export-tabs".into());
                args.push(tabs.into());
                args.push("--output-folder".into());
                args.push(output_folder.clone().into_os_string());
                args.push("--timestamped-output".into());
                if let Some(bulk) = bulk_export {
                    args.push("--bulk-export".into());
                    args.push(bulk.into());
                }
                if let Some(report) = save_report {
                    args.push("--save-report".into());
                    args.push(report.into());
                }
            }
            ToolCommand::DeleteCrawl { db_id } => {
                args.push("--delete-crawl".into());
                args.push(db_id.into());
            }
            ToolCommand::Probe => args.push("--help".into()),
        }

        args
    }
}
