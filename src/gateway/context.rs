//! Error context builder for structured, actionable error messages
//!
//! Every failed gateway action is rendered with:
//! - Operation that failed
//! - Details about what was checked
//! - Actionable suggestions for resolution

use crate::error::BrokerError;
use crate::utils::format_elapsed;

/// Builder for structured error messages with context and suggestions
#[derive(Debug, Clone)]
pub struct ErrorContext {
    operation: String,
    details: Vec<String>,
    suggestions: Vec<String>,
}

impl ErrorContext {
    /// Create new error context for an operation
    ///
    /// # Example
    /// ```
    /// # use kodegen_tools_seospider::gateway::ErrorContext;
    /// let ctx = ErrorContext::new("Export crawl");
    /// ```
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            details: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add detail about what was checked or why it failed
    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Add actionable suggestion for resolution
    #[must_use]
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Describe a broker error, with suggestions for retrying
    #[must_use]
    pub fn from_error(self, error: &BrokerError) -> Self {
        let ctx = self.detail(error.to_string());
        match error {
            BrokerError::Validation(_) => ctx.suggest("Correct the parameter and retry"),
            BrokerError::ResourceLocked => ctx
                .suggest("Quit the SEO Spider GUI, then retry")
                .suggest("list_crawls works while the GUI is open"),
            BrokerError::CapacityExceeded { .. } => ctx
                .suggest("Wait for running work to finish, then retry")
                .suggest("Use crawl_status to see when a crawl has finished"),
            BrokerError::NotFound { what, available, .. } => {
                let ctx = if !available.is_empty() {
                    ctx.detail(format!("Available: {}", available.join(", ")))
                } else if matches!(*what, "export" | "crawl job") {
                    ctx.detail(format!("No active {what}s"))
                } else {
                    ctx
                };
                match *what {
                    "export" | "export directory" => {
                        ctx.suggest("Run export_crawl again to get a fresh export_id")
                    }
                    "crawl job" => ctx.suggest("Use the crawl_id returned by crawl_site"),
                    _ => ctx.suggest("Retry with one of the available names"),
                }
            }
            BrokerError::ExportFailed { output_tail, .. } => ctx
                .detail(format!("Last output:\n{output_tail}"))
                .suggest("Check the DB ID with list_crawls"),
            BrokerError::Timeout {
                limit, export_id, ..
            } => {
                let ctx = ctx.detail(format!("Limit: {}", format_elapsed(*limit)));
                match export_id {
                    Some(id) => ctx
                        .detail(format!("Partial export kept as {id}"))
                        .suggest("The crawl may be very large; export fewer tabs"),
                    None => ctx.suggest("Retry later"),
                }
            }
            BrokerError::NoCsvOutput { export_id, db_id } => ctx
                .detail(format!("Export ID: {export_id}"))
                .detail(format!("DB ID: {db_id}"))
                .suggest("Check the DB ID with list_crawls")
                .suggest("Check export_tabs against seospider://export-reference"),
            BrokerError::EmptyResult {
                export_id,
                db_id,
                front_end_running,
                ..
            } => {
                let ctx = ctx
                    .detail(format!("Export ID: {export_id}"))
                    .detail(format!("DB ID: {db_id}"));
                if *front_end_running {
                    ctx.detail("The SEO Spider GUI is currently running")
                        .suggest("Quit the GUI and re-run the export")
                } else {
                    ctx.suggest("The GUI may have held the database lock; retry the export")
                        .suggest("Check the DB ID with list_crawls")
                }
            }
            BrokerError::ToolUnavailable(_) => ctx.suggest("Check SF_CLI_PATH in .env"),
            BrokerError::Io(_) | BrokerError::Internal(_) => ctx,
        }
    }

    /// Build formatted error message
    ///
    /// Format:
    /// ```text
    /// Operation failed: {operation}
    ///
    /// Details:
    ///   - {detail1}
    ///
    /// Suggestions:
    ///   - {suggestion1}
    /// ```
    #[must_use]
    pub fn build(self) -> String {
        let mut msg = format!("Operation failed: {}\n", self.operation);

        if !self.details.is_empty() {
            msg.push_str("\nDetails:\n");
            for detail in &self.details {
                msg.push_str(&format!("  - {detail}\n"));
            }
        }

        if !self.suggestions.is_empty() {
            msg.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                msg.push_str(&format!("  - {suggestion}\n"));
            }
        }

        msg
    }
}
