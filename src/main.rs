// SEO Spider broker
//
// Serves crawl, export and read actions as JSON lines on stdin/stdout.
// Logs go to stderr so stdout carries only protocol responses.

use anyhow::{Context, Result};
use kodegen_tools_seospider::{Broker, BrokerConfig, gateway};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = BrokerConfig::from_env().context("invalid broker configuration")?;
    tracing::info!(
        tool = %config.tool_path().display(),
        export_root = %config.export_root().display(),
        "Starting SEO Spider broker"
    );

    let broker = Arc::new(Broker::new(config));
    let report = broker
        .startup()
        .await
        .context("failed to prepare export root")?;
    tracing::info!(
        expired = report.expired,
        orphans = report.orphans,
        symlinks = report.symlinks,
        "Startup eviction complete"
    );

    broker.clone().start_cleanup_task();

    gateway::serve(broker, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("gateway I/O failed")?;

    tracing::info!("Input closed, shutting down");
    Ok(())
}
