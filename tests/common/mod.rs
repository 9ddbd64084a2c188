//! Test utilities and helper functions for the broker test suite
//!
//! The Tool is replaced by a small `sh` script whose behaviour is keyed on the
//! arguments it receives; the process-table probe is replaced by `true`
//! (front-end running) or `false` (not running).

#![allow(dead_code)]

use kodegen_tools_seospider::{BrokerConfig, prepare_export_root};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Fake launcher covering every command in the Tool grammar
///
/// Crawls:
/// - `*fast.example*` finishes immediately with a summary line
/// - `*broken.example*` fails with exit code 2
/// - anything else runs until `<script>.release` exists (30 s cap)
///
/// Exports, keyed on the database id:
/// - `full`: one CSV with 5 rows and one header-only CSV
/// - `empty`: one header-only CSV
/// - `fail`: exit code 1
/// - `slow`: never finishes
/// - anything else: exits 0 and writes nothing
pub const FAKE_TOOL: &str = r#"#!/bin/sh
[ "$1" = "--headless" ] || { echo "missing --headless" >&2; exit 64; }
shift
case "$1" in
  --help)
    echo "INFO  - Running: SEO Spider 99.0"
    echo "INFO  - Licence Status: Valid"
    exit 0 ;;
  --list-crawls)
    echo "INFO  - Memory: 4GB"
    echo "example.com  Database Id: abc123"
    exit 0 ;;
  --delete-crawl)
    [ "$2" = "abc123" ] && exit 0
    echo "ERROR no such crawl $2" >&2
    exit 3 ;;
  --crawl)
    case "$2" in
      *fast.example*)
        echo "INFO  - Crawl complete: 42 URLs crawled"
        exit 0 ;;
      *broken.example*)
        echo "INFO  - starting"
        echo "fatal: connection refused" >&2
        exit 2 ;;
      *)
        n=0
        while [ ! -f "$0.release" ] && [ $n -lt 300 ]; do
          sleep 0.1
          n=$((n + 1))
        done
        echo "INFO  - 7 URLs crawled"
        exit 0 ;;
    esac ;;
  --load-crawl)
    db="$2"
    out=""
    while [ $# -gt 0 ]; do
      [ "$1" = "--output-folder" ] && out="$2"
      shift
    done
    dir="$out/2025.01.01.00.00.00"
    case "$db" in
      full)
        mkdir -p "$dir"
        printf 'Address,Status Code\nhttps://a.example/,200\nhttps://b.example/,404\nhttps://c.example/,200\nhttps://d.example/,301\nhttps://e.example/,200\n' > "$dir/internal_all.csv"
        printf 'Address,H1-1\n' > "$dir/h1_all.csv" ;;
      empty)
        mkdir -p "$dir"
        printf 'Address,Status Code\n' > "$dir/internal_all.csv" ;;
      fail)
        echo "INFO  - Loading crawl"
        echo "ERROR - crawl not found" >&2
        exit 1 ;;
      slow)
        exec sleep 30 ;;
    esac
    exit 0 ;;
esac
exit 65
"#;

/// Scratch layout for one test
pub struct TestEnv {
    pub dir: TempDir,
    pub tool: PathBuf,
    pub export_root: PathBuf,
    pub data_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let tool = write_script(dir.path(), "seospider", FAKE_TOOL);
        let export_root = dir.path().join("exports");
        let data_dir = dir.path().join("data");
        prepare_export_root(&export_root).unwrap();
        fs::create_dir_all(&data_dir).unwrap();
        Self {
            dir,
            tool,
            export_root,
            data_dir,
        }
    }

    /// Let every waiting fake crawl finish
    pub fn release_crawls(&self) {
        let mut release = self.tool.as_os_str().to_owned();
        release.push(".release");
        fs::write(release, "").unwrap();
    }

    /// Config pointing at the fake Tool; `front_end_running` picks the probe
    pub fn config(&self, front_end_running: bool) -> BrokerConfig {
        self.config_builder(front_end_running).build().unwrap()
    }

    pub fn config_builder(
        &self,
        front_end_running: bool,
    ) -> kodegen_tools_seospider::config::BrokerConfigBuilder<
        kodegen_tools_seospider::config::WithToolPath,
    > {
        BrokerConfig::builder()
            .tool_path(&self.tool)
            .export_root(&self.export_root)
            .data_dir(&self.data_dir)
            .lock_probe_program(if front_end_running { "true" } else { "false" })
            .output_drain_timeout(Duration::from_secs(2))
    }

    /// Names directly under the export root
    pub fn export_root_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.export_root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Write an executable script
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
