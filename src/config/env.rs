//! Environment-driven configuration and export root preparation

use super::types::BrokerConfig;
use crate::error::{BrokerError, BrokerResult};
use crate::utils::DEFAULT_CLI_PATH;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Launcher path override
pub const ENV_CLI_PATH: &str = "SF_CLI_PATH";
pub const ENV_EXPORT_DIR: &str = "SEOSPIDER_EXPORT_DIR";
pub const ENV_DATA_DIR: &str = "SEOSPIDER_DATA_DIR";
pub const ENV_EXPORT_TTL_SECS: &str = "SEOSPIDER_EXPORT_TTL_SECS";
pub const ENV_MAX_CRAWLS: &str = "SEOSPIDER_MAX_CRAWLS";
pub const ENV_MAX_EXPORTS: &str = "SEOSPIDER_MAX_EXPORTS";

fn home_dir() -> BrokerResult<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| BrokerError::Internal("could not determine home directory".to_string()))
}

/// `~/.cache/kodegen/seospider/exports` (or the platform cache dir)
pub(crate) fn default_export_root() -> BrokerResult<PathBuf> {
    let cache = match dirs::cache_dir() {
        Some(dir) => dir,
        None => home_dir()?.join(".cache"),
    };
    Ok(cache.join("kodegen").join("seospider").join("exports"))
}

/// `~/.ScreamingFrogSEOSpider/ProjectInstanceData`
pub(crate) fn default_data_dir() -> BrokerResult<PathBuf> {
    Ok(home_dir()?
        .join(".ScreamingFrogSEOSpider")
        .join("ProjectInstanceData"))
}

fn parse_var<T: FromStr>(name: &str) -> BrokerResult<Option<T>> {
    match std::env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| BrokerError::Validation(format!("{name} has an invalid value: {raw}"))),
        Err(_) => Ok(None),
    }
}

impl BrokerConfig {
    /// Build a config from process environment variables
    ///
    /// A missing launcher is not an error here: every operation re-checks the
    /// executable so the broker can start before the Tool is installed.
    ///
    /// # Errors
    ///
    /// Returns `BrokerError::Validation` for unparsable numeric variables.
    pub fn from_env() -> BrokerResult<Self> {
        let tool_path = std::env::var_os(ENV_CLI_PATH)
            .map_or_else(|| PathBuf::from(DEFAULT_CLI_PATH), PathBuf::from);

        let mut builder = BrokerConfig::builder().tool_path(tool_path);

        if let Some(dir) = std::env::var_os(ENV_EXPORT_DIR) {
            builder = builder.export_root(dir);
        }
        if let Some(dir) = std::env::var_os(ENV_DATA_DIR) {
            builder = builder.data_dir(dir);
        }
        if let Some(secs) = parse_var::<u64>(ENV_EXPORT_TTL_SECS)? {
            builder = builder.export_ttl(Duration::from_secs(secs));
        }
        if let Some(limit) = parse_var::<usize>(ENV_MAX_CRAWLS)? {
            builder = builder.max_concurrent_crawls(limit);
        }
        if let Some(limit) = parse_var::<usize>(ENV_MAX_EXPORTS)? {
            builder = builder.max_active_exports(limit);
        }

        builder.build()
    }
}

/// Create `root` (and parents) and restrict it to the current user
///
/// # Errors
///
/// Returns `BrokerError::Io` if the directory cannot be created or chmodded.
pub fn prepare_export_root(root: &Path) -> BrokerResult<()> {
    std::fs::create_dir_all(root)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(root, std::fs::Permissions::from_mode(0o700))?;
    }

    tracing::debug!(root = %root.display(), "Export root ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_defaults() {
        let config = BrokerConfig::builder()
            .tool_path("/opt/seospider")
            .export_root("/tmp/exports")
            .data_dir("/tmp/data")
            .build()
            .unwrap();

        assert_eq!(config.max_concurrent_crawls(), 2);
        assert_eq!(config.max_active_exports(), 10);
        assert_eq!(config.export_ttl(), Duration::from_secs(3600));
        assert_eq!(config.lock_probe_pattern(), "ScreamingFrogSEOSpider.jar");
    }

    #[test]
    fn zero_ceilings_are_rejected() {
        let result = BrokerConfig::builder()
            .tool_path("/opt/seospider")
            .export_root("/tmp/exports")
            .data_dir("/tmp/data")
            .max_concurrent_crawls(0)
            .build();
        assert!(matches!(result, Err(BrokerError::Validation(_))));
    }

    #[cfg(unix)]
    #[test]
    fn export_root_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("a").join("exports");
        prepare_export_root(&root).unwrap();

        let mode = std::fs::metadata(&root).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}
