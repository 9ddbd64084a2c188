//! Paginated, filtered reads of exported CSV files

use super::types::{Page, ReadRequest, RowFilter};
use crate::error::{BrokerError, BrokerResult};
use crate::security::{PathGuard, PathGuardError};
use crate::utils::DEFAULT_READ_LIMIT;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

impl From<PathGuardError> for BrokerError {
    fn from(error: PathGuardError) -> Self {
        match error {
            PathGuardError::NotFound { name, available } => BrokerError::NotFound {
                what: "file",
                name,
                available,
            },
            PathGuardError::OutsideRoot(_) => BrokerError::Validation(error.to_string()),
            PathGuardError::Root(e) => BrokerError::NotFound {
                what: "export directory",
                name: e.to_string(),
                available: Vec::new(),
            },
        }
    }
}

/// Active filter, only when both column and value are non-empty
fn row_filter(request: &ReadRequest) -> Option<RowFilter> {
    let column = request.filter_column.as_deref()?.trim();
    let value = request.filter_value.as_deref()?;
    if column.is_empty() || value.is_empty() {
        return None;
    }
    Some(RowFilter {
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Read one page of `request.file` from the export directory `dir`
///
/// Blocking; run it on the blocking pool.
///
/// # Errors
///
/// `NotFound` (with available files) if the reference resolves to nothing,
/// `Validation` for a zero limit or a path outside `dir`, `Internal` if the
/// file is not parseable CSV.
pub fn read_page(dir: &Path, request: &ReadRequest) -> BrokerResult<Page> {
    let limit = request.limit.unwrap_or(DEFAULT_READ_LIMIT);
    if limit == 0 {
        return Err(BrokerError::Validation("limit must be at least 1".to_string()));
    }

    let guard = PathGuard::new(dir)?;
    let path = guard.resolve(&request.file)?;
    let file = path
        .strip_prefix(guard.root())
        .map(|rel| rel.to_string_lossy().into_owned())
        .unwrap_or_else(|_| request.file.clone());

    let parse_error = |e: csv::Error| BrokerError::Internal(format!("Failed to read {file}: {e}"));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(&path)
        .map_err(parse_error)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches(UTF8_BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let filter = row_filter(request);
    let filter_index = filter
        .as_ref()
        .map(|f| (columns.iter().position(|c| *c == f.column), f.value.to_lowercase()));

    let mut rows = Vec::new();
    let mut skipped = 0;
    for record in reader.records() {
        let record = record.map_err(parse_error)?;

        if let Some((index, needle)) = &filter_index {
            let cell = index.and_then(|i| record.get(i)).unwrap_or("");
            if !cell.to_lowercase().contains(needle.as_str()) {
                continue;
            }
        }

        if skipped < request.offset {
            skipped += 1;
            continue;
        }

        rows.push(
            (0..columns.len())
                .map(|i| record.get(i).unwrap_or("").to_string())
                .collect(),
        );
        if rows.len() >= limit {
            break;
        }
    }

    Ok(Page {
        file,
        has_more: rows.len() == limit,
        columns,
        rows,
        offset: request.offset,
        limit,
        filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn request(file: &str) -> ReadRequest {
        ReadRequest {
            export_id: "export-00000000".to_string(),
            file: file.to_string(),
            ..ReadRequest::default()
        }
    }

    #[test]
    fn bom_is_stripped_from_first_header() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.csv"), "\u{feff}Address,Status\nx,200\n").unwrap();

        let page = read_page(tmp.path(), &request("a.csv")).unwrap();
        assert_eq!(page.columns, vec!["Address", "Status"]);
        assert_eq!(page.rows, vec![vec!["x".to_string(), "200".to_string()]]);
        assert!(!page.has_more);
    }

    #[test]
    fn filter_on_unknown_column_matches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.csv"), "Address\nx\n").unwrap();

        let mut req = request("a.csv");
        req.filter_column = Some("Status".to_string());
        req.filter_value = Some("200".to_string());
        let page = read_page(tmp.path(), &req).unwrap();
        assert!(page.rows.is_empty());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut req = request("a.csv");
        req.limit = Some(0);
        assert!(matches!(
            read_page(tmp.path(), &req),
            Err(BrokerError::Validation(_))
        ));
    }
}
