//! Bounded export invocation and inventory of what it produced

use super::types::ExportedFile;
use crate::error::BrokerResult;
use crate::tool::{ToolCli, ToolCommand, ToolOutput};
use jwalk::WalkDir;
use std::path::Path;
use std::time::Duration;

/// Runs `--load-crawl ... --export-tabs ...` and waits for it
#[derive(Debug, Clone)]
pub struct ExportDriver {
    tool: ToolCli,
    timeout: Duration,
}

impl ExportDriver {
    #[must_use]
    pub fn new(tool: ToolCli, timeout: Duration) -> Self {
        Self { tool, timeout }
    }

    #[must_use]
    pub fn tool(&self) -> &ToolCli {
        &self.tool
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Invoke the Tool once, writing into `output_folder`
    ///
    /// Inputs must already be validated. A non-zero exit is returned as a
    /// normal `ToolOutput`; the caller decides how to report it.
    ///
    /// # Errors
    ///
    /// `ToolUnavailable`, or `Timeout` after the child has been killed.
    pub async fn run(
        &self,
        db_id: &str,
        tabs: &str,
        output_folder: &Path,
        bulk_export: Option<&str>,
        save_report: Option<&str>,
    ) -> BrokerResult<ToolOutput> {
        let cmd = ToolCommand::Export {
            db_id: db_id.to_string(),
            tabs: tabs.to_string(),
            output_folder: output_folder.to_path_buf(),
            bulk_export: bulk_export.map(String::from),
            save_report: save_report.map(String::from),
        };
        self.tool.run(&cmd, self.timeout).await
    }
}

/// Regular files under `dir` (recursively, sorted) with CSV row counts
#[must_use]
pub fn inventory(dir: &Path) -> Vec<ExportedFile> {
    WalkDir::new(dir)
        .skip_hidden(false)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.path();
            let relative_path = path.strip_prefix(dir).ok()?.to_string_lossy().into_owned();
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            let data_rows = is_csv.then(|| count_data_rows(&path));
            Some(ExportedFile {
                relative_path,
                size,
                data_rows,
            })
        })
        .collect()
}

/// Records below the header; unreadable files count as zero
fn count_data_rows(path: &Path) -> usize {
    match csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
    {
        Ok(mut reader) => reader.byte_records().filter_map(Result::ok).count(),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Could not open export file");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn inventory_counts_rows_below_header() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("2025.01.01.12.00.00");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("internal_all.csv"), "Address,Status\na,200\nb,404\n").unwrap();
        fs::write(nested.join("h1_all.csv"), "Address,H1\n").unwrap();
        fs::write(tmp.path().join("notes.txt"), "hello").unwrap();

        let files = inventory(tmp.path());
        assert_eq!(files.len(), 3);

        let internal = files
            .iter()
            .find(|f| f.relative_path.ends_with("internal_all.csv"))
            .unwrap();
        assert_eq!(internal.data_rows, Some(2));

        let h1 = files.iter().find(|f| f.relative_path.ends_with("h1_all.csv")).unwrap();
        assert_eq!(h1.data_rows, Some(0));

        let notes = files.iter().find(|f| f.relative_path == "notes.txt").unwrap();
        assert!(!notes.is_csv());
    }
}
