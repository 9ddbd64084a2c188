//! TTL eviction of export directories
//!
//! Two passes. The registry pass deletes registered directories whose
//! creation time is past the TTL. The disk pass walks only the top level of
//! the export root: symlinks are unlinked without being followed, and
//! unregistered entries whose mtime is past the TTL are deleted.

use super::types::{ExportEntry, SweepReport};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const LOG_TARGET: &str = "seospider::exports";

fn is_past_ttl(since: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    match (now - since).to_std() {
        Ok(age) => age > ttl,
        // `since` is in the future
        Err(_) => false,
    }
}

/// Remove entries older than `ttl` from the registry and return their paths
pub(crate) fn take_expired(
    exports: &mut HashMap<String, ExportEntry>,
    now: DateTime<Utc>,
    ttl: Duration,
) -> Vec<PathBuf> {
    let expired: Vec<String> = exports
        .iter()
        .filter(|(_, entry)| is_past_ttl(entry.created_at, now, ttl))
        .map(|(id, _)| id.clone())
        .collect();

    expired
        .into_iter()
        .filter_map(|id| {
            let entry = exports.remove(&id)?;
            log::debug!(
                target: LOG_TARGET,
                "Export {id} (db {}) expired",
                entry.db_id
            );
            Some(entry.path)
        })
        .collect()
}

/// Delete expired directories, then clean the top level of `root`
///
/// `registered` holds the directory names still in the registry.
pub(crate) fn reclaim(
    root: &Path,
    expired: Vec<PathBuf>,
    registered: &HashSet<String>,
    now: DateTime<Utc>,
    ttl: Duration,
) -> SweepReport {
    let mut report = SweepReport::default();

    for path in expired {
        report.expired += 1;
        // A symlink in its place is left for the disk pass.
        if fs::symlink_metadata(&path).is_ok_and(|meta| meta.is_dir()) {
            remove_tree(&path);
        }
    }

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Export root {} unreadable: {e}", root.display());
            return report;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        // `DirEntry::file_type` does not follow symlinks.
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_symlink() {
            match fs::remove_file(&path) {
                Ok(()) => {
                    report.symlinks += 1;
                    log::warn!(target: LOG_TARGET, "Removed symlink {} from export root", path.display());
                }
                Err(e) => log::warn!(target: LOG_TARGET, "Failed to unlink {}: {e}", path.display()),
            }
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if registered.contains(&name) {
            continue;
        }

        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .map(DateTime::<Utc>::from);
        let Ok(modified) = modified else {
            continue;
        };
        if !is_past_ttl(modified, now, ttl) {
            continue;
        }

        if file_type.is_dir() {
            remove_tree(&path);
        } else if let Err(e) = fs::remove_file(&path) {
            log::warn!(target: LOG_TARGET, "Failed to remove {}: {e}", path.display());
            continue;
        }
        report.orphans += 1;
    }

    report
}

fn remove_tree(path: &Path) {
    // `remove_dir_all` unlinks nested symlinks rather than following them.
    if let Err(e) = fs::remove_dir_all(path) {
        log::warn!(target: LOG_TARGET, "Failed to remove {}: {e}", path.display());
    } else {
        log::debug!(target: LOG_TARGET, "Removed {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: PathBuf, created_at: DateTime<Utc>) -> ExportEntry {
        ExportEntry {
            path,
            created_at,
            db_id: "db".to_string(),
        }
    }

    #[test]
    fn expiry_is_strictly_after_ttl() {
        let ttl = Duration::from_secs(3600);
        let created = Utc::now();
        let mut exports = HashMap::new();
        exports.insert("export-a".to_string(), entry(PathBuf::from("/x/a"), created));

        let just_before = created + chrono::Duration::seconds(3599);
        assert!(take_expired(&mut exports, just_before, ttl).is_empty());
        assert_eq!(exports.len(), 1);

        let just_after = created + chrono::Duration::seconds(3601);
        assert_eq!(take_expired(&mut exports, just_after, ttl), vec![PathBuf::from("/x/a")]);
        assert!(exports.is_empty());
    }

    #[test]
    fn fresh_orphans_survive() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("export-young")).unwrap();

        let report = reclaim(
            tmp.path(),
            Vec::new(),
            &HashSet::new(),
            Utc::now(),
            Duration::from_secs(3600),
        );
        assert_eq!(report, SweepReport::default());
        assert!(tmp.path().join("export-young").exists());
    }
}
