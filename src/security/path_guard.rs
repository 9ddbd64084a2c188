//! Containment-checked file resolution inside an export directory
//!
//! Callers pass a free-form file reference (a bare name, a relative path, or
//! something hostile like `../../etc/passwd`). Every candidate is canonicalized
//! and must sit under the canonical root before it is returned. Symlinks are
//! never followed out of the root: a link that points outside fails the
//! containment check, and the fallback search skips links entirely.

use jwalk::WalkDir;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathGuardError {
    /// No contained file matched the reference
    #[error("File '{name}' not found")]
    NotFound {
        name: String,
        /// Every file under the root, relative to it
        available: Vec<String>,
    },

    /// A resolved candidate fell outside the root
    #[error("Invalid file path: {0}")]
    OutsideRoot(String),

    /// The root itself could not be canonicalized
    #[error("Export directory unavailable: {0}")]
    Root(#[source] std::io::Error),
}

/// Resolver bound to one trusted root directory
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Bind a guard to `root`
    ///
    /// # Errors
    ///
    /// Returns `PathGuardError::Root` if `root` does not exist.
    pub fn new(root: &Path) -> Result<Self, PathGuardError> {
        let root = root.canonicalize().map_err(PathGuardError::Root)?;
        Ok(Self { root })
    }

    /// Canonical root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonicalize `candidate` and return it only if it lies under the root
    fn contained(&self, candidate: &Path) -> Option<PathBuf> {
        let canonical = candidate.canonicalize().ok()?;
        canonical.starts_with(&self.root).then_some(canonical)
    }

    /// Resolve `reference` to a regular file under the root
    ///
    /// Resolution order:
    /// 1. the literal reference joined to the root, if contained;
    /// 2. otherwise the final path component joined to the root;
    /// 3. otherwise a recursive search for an exact file-name match;
    /// 4. otherwise a recursive search for a file name containing it.
    ///
    /// # Errors
    ///
    /// `NotFound` (with the available listing) when nothing matches,
    /// `OutsideRoot` if the chosen candidate fails the final containment check.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf, PathGuardError> {
        let reference = reference.trim();
        let safe_name = Path::new(reference)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let candidate = self
            .direct_candidate(reference, &safe_name)
            .or_else(|| self.search(|name| name == safe_name, &safe_name))
            .or_else(|| self.search(|name| name.contains(safe_name.as_str()), &safe_name));

        let Some(candidate) = candidate else {
            return Err(PathGuardError::NotFound {
                name: if safe_name.is_empty() {
                    reference.to_string()
                } else {
                    safe_name
                },
                available: self.list_files(),
            });
        };

        // Re-check right before handing the path out.
        match self.contained(&candidate) {
            Some(path) if path.is_file() => Ok(path),
            _ => Err(PathGuardError::OutsideRoot(reference.to_string())),
        }
    }

    fn direct_candidate(&self, reference: &str, safe_name: &str) -> Option<PathBuf> {
        if reference.is_empty() {
            return None;
        }
        let literal = self.root.join(reference);
        let target = match self.contained(&literal) {
            Some(path) => path,
            None if !safe_name.is_empty() => self.contained(&self.root.join(safe_name))?,
            None => return None,
        };
        target.is_file().then_some(target)
    }

    fn search<F>(&self, matches: F, safe_name: &str) -> Option<PathBuf>
    where
        F: Fn(&str) -> bool,
    {
        if safe_name.is_empty() {
            return None;
        }
        self.walk_files()
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| matches(&name.to_string_lossy()))
            })
            .find_map(|path| self.contained(&path))
    }

    /// Regular files under the root in sorted walk order (links excluded)
    fn walk_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .skip_hidden(false)
            .sort(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path())
            .collect()
    }

    /// Every regular file under the root, relative to it
    #[must_use]
    pub fn list_files(&self) -> Vec<String> {
        let mut files: Vec<String> = self
            .walk_files()
            .iter()
            .filter_map(|path| path.strip_prefix(&self.root).ok())
            .map(|rel| rel.to_string_lossy().into_owned())
            .collect();
        files.sort();
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn bare_name_resolves() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("internal_all.csv"), "a\n1\n").unwrap();

        let guard = PathGuard::new(tmp.path()).unwrap();
        let path = guard.resolve("internal_all.csv").unwrap();
        assert!(path.ends_with("internal_all.csv"));
    }

    #[test]
    fn empty_reference_lists_available() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.csv"), "").unwrap();

        let guard = PathGuard::new(tmp.path()).unwrap();
        match guard.resolve("") {
            Err(PathGuardError::NotFound { available, .. }) => {
                assert_eq!(available, vec!["a.csv".to_string()]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
