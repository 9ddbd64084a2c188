//! Plain-text rendering of successful results
//!
//! Responses embed the follow-up call a caller would make next.

use crate::exports::{ExportSummary, Page};
use crate::jobs::{JobSnapshot, SubmittedJob};
use crate::storage::StorageSummary;
use crate::tool::{CrawlListing, DeleteOutcome, ToolInfo};
use crate::utils::{format_elapsed, format_size, truncate_cell};
use std::fmt::Write;

/// Separator dashes per column are capped at this width
const MAX_SEPARATOR_WIDTH: usize = 30;

pub fn tool_info(info: &ToolInfo) -> String {
    format!(
        "SEO Spider is installed and accessible.\nVersion: {}\nLicence: {}",
        info.version, info.licence_status
    )
}

pub fn submitted(job: &SubmittedJob) -> String {
    let pid = job.pid.map_or_else(|| "unknown".to_string(), |p| p.to_string());
    format!(
        "Crawl started in background.\n\
         Crawl ID: {}\n\
         PID: {pid}\n\
         URL: {}\n\
         Label: {}\n\n\
         Use crawl_status {{\"crawl_id\": \"{}\"}} to check progress.",
        job.job_id, job.url, job.label, job.job_id
    )
}

pub fn snapshot(snapshot: &JobSnapshot) -> String {
    match snapshot {
        JobSnapshot::Running {
            job_id,
            url,
            label,
            pid,
            elapsed,
        } => {
            let pid = pid.map_or_else(|| "unknown".to_string(), |p| p.to_string());
            format!(
                "Crawl {job_id} is still running.\n\
                 URL: {url}\n\
                 Label: {label}\n\
                 PID: {pid}\n\
                 Elapsed: {}\n\n\
                 Use crawl_status {{\"crawl_id\": \"{job_id}\"}} to check again.",
                format_elapsed(*elapsed)
            )
        }
        JobSnapshot::Finished {
            job_id,
            url,
            label,
            outcome,
        } => {
            let status = if outcome.succeeded() {
                "completed".to_string()
            } else {
                match outcome.exit_code {
                    Some(code) => format!("failed (exit code {code})"),
                    None => "failed (terminated by signal)".to_string(),
                }
            };
            let mut text = format!(
                "Crawl {job_id} {status}.\n\
                 URL: {url}\n\
                 Label: {label}\n\
                 Elapsed: {}\n\
                 URLs crawled: {}\n",
                format_elapsed(outcome.elapsed),
                outcome.summary.as_deref().unwrap_or("unknown")
            );
            if let Some(tail) = &outcome.output_tail {
                let _ = write!(text, "\nLast output:\n{tail}\n");
            }
            text.push_str(
                "\nThe crawl is saved in the SEO Spider database.\n\
                 Use list_crawls to see all saved crawls and get the DB ID.\n\
                 Then use export_crawl {\"db_id\": \"...\"} to export data as CSV.",
            );
            text
        }
    }
}

pub fn listing(listing: &CrawlListing) -> String {
    match listing {
        CrawlListing::Crawls(lines) | CrawlListing::DatabaseLines(lines) => {
            format!("Saved crawls in SEO Spider database:\n\n{}", lines.join("\n"))
        }
        CrawlListing::Raw(tail) => format!(
            "SEO Spider --list-crawls output:\n\n{tail}\n\n\
             Note: If no crawls are shown, the database may be empty."
        ),
    }
}

pub fn export(summary: &ExportSummary, ttl_text: &str) -> String {
    let csv_count = summary.csv_files().count();
    let mut text = format!(
        "Export completed. {csv_count} CSV files generated ({} total data rows).\n\
         Export ID: {}\n\
         DB ID: {}\n\nFiles:\n",
        summary.total_data_rows, summary.export_id, summary.db_id
    );
    for file in &summary.files {
        let _ = writeln!(text, "  {} ({})", file.relative_path, format_size(file.size));
    }
    let _ = write!(
        text,
        "\nUse read_crawl_data {{\"export_id\": \"{}\", \"file\": \"filename.csv\"}} to read data.\n\
         Files auto-delete after {ttl_text}.",
        summary.export_id
    );
    text
}

pub fn page(page: &Page) -> String {
    if page.rows.is_empty() {
        return format!("No matching rows in {}.", page.file);
    }

    let mut text = format!(
        "File: {}\nShowing rows {}-{}",
        page.file,
        page.offset + 1,
        page.offset + page.rows.len()
    );
    if let Some(filter) = &page.filter {
        let _ = write!(
            text,
            " (filtered: {} contains '{}')",
            filter.column, filter.value
        );
    }
    text.push_str("\n\n");

    text.push_str(&page.columns.join(" | "));
    text.push('\n');
    let separator: Vec<String> = page
        .columns
        .iter()
        .map(|c| "-".repeat(c.chars().count().min(MAX_SEPARATOR_WIDTH)))
        .collect();
    text.push_str(&separator.join("-+-"));
    text.push('\n');

    for row in &page.rows {
        let cells: Vec<String> = row.iter().map(|cell| truncate_cell(cell)).collect();
        text.push_str(&cells.join(" | "));
        text.push('\n');
    }

    if page.has_more {
        let _ = write!(
            text,
            "\n... showing first {} rows. Use offset={} for next page.",
            page.limit,
            page.next_offset()
        );
    }
    text
}

pub fn delete(db_id: &str, outcome: &DeleteOutcome) -> String {
    match outcome {
        DeleteOutcome::Deleted => format!("Crawl {db_id} deleted successfully."),
        DeleteOutcome::MayHaveFailed {
            exit_code,
            output_tail,
        } => {
            let code = exit_code.map_or_else(|| "none".to_string(), |c| c.to_string());
            format!("Delete may have failed (exit code {code}):\n{output_tail}")
        }
    }
}

pub fn storage(summary: &StorageSummary, ttl_text: &str) -> String {
    if !summary.data_dir_found {
        return "SEO Spider data directory not found.".to_string();
    }

    let mut text = format!(
        "SEO Spider Storage Summary\n{}\n\nTotal DB size: {}\n\n",
        "=".repeat(40),
        format_size(summary.total_size)
    );

    if summary.entries.is_empty() {
        text.push_str("No crawl databases found.\n");
    } else {
        text.push_str("Crawl databases:\n");
        for entry in &summary.entries {
            let _ = writeln!(text, "  {}: {}", entry.name, format_size(entry.size));
        }
    }

    if summary.export_count > 0 {
        let _ = write!(
            text,
            "\nTemp exports: {} dirs, {} (auto-cleaned after {ttl_text})",
            summary.export_count,
            format_size(summary.export_size)
        );
    }
    text
}
