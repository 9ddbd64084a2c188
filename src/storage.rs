//! Disk usage of the Tool's database and of the export root
//!
//! Read-only: nothing here writes to either directory.

use jwalk::WalkDir;
use std::fs;
use std::path::Path;

/// Size of one top-level entry of the Tool's data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSummary {
    /// `false` when the data directory does not exist
    pub data_dir_found: bool,
    /// Every file under the data directory
    pub total_size: u64,
    /// Top-level directories (crawl databases), sorted by name
    pub entries: Vec<StorageEntry>,
    pub export_count: usize,
    pub export_size: u64,
}

/// Total size of regular files under `path`, symlinks not followed
fn tree_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .skip_hidden(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// Measure `data_dir` and `export_root`
#[must_use]
pub fn summarize(data_dir: &Path, export_root: &Path) -> StorageSummary {
    let mut summary = StorageSummary::default();

    if let Ok(read) = fs::read_dir(data_dir) {
        summary.data_dir_found = true;

        let mut items: Vec<fs::DirEntry> = read.filter_map(Result::ok).collect();
        items.sort_by_key(fs::DirEntry::file_name);

        for item in items {
            let Ok(file_type) = item.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                let size = tree_size(&item.path());
                summary.total_size += size;
                summary.entries.push(StorageEntry {
                    name: item.file_name().to_string_lossy().into_owned(),
                    size,
                });
            } else if file_type.is_file() {
                summary.total_size += item.metadata().map(|m| m.len()).unwrap_or(0);
            }
        }
    }

    if let Ok(read) = fs::read_dir(export_root) {
        for item in read.filter_map(Result::ok) {
            if item.file_type().is_ok_and(|t| t.is_dir()) {
                summary.export_count += 1;
                summary.export_size += tree_size(&item.path());
            }
        }
    }

    summary
}
