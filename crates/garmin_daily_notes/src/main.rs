use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use garmin_bridge_client::HealthDataSource;
use garmin_bridge_client::http_client::ReqwestBridgeClient;
use garmin_daily_notes::cli::Cli;
use garmin_daily_notes::{
    DateOutcome, DateStatus, FsVault, LoggingSource, NoteSyncer, SampleSource, SyncConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Configure logging from env var `GARMIN_NOTES_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("GARMIN_NOTES_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!("garmin-daily-notes: log filter: {}", log_env);

    let source: Arc<dyn HealthDataSource> = if cli.sample {
        tracing::info!("using built-in sample data");
        Arc::new(LoggingSource::new(SampleSource))
    } else {
        let mut config = garmin_bridge_client::config::Config::from_env()?;
        if let Some(url) = &cli.server_url {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        tracing::info!(bridge = %config.base_url, "using Garmin bridge");
        Arc::new(LoggingSource::new(ReqwestBridgeClient::from_config(&config)))
    };

    if cli.check {
        let status = source
            .check_connection()
            .await
            .context("bridge connection check failed")?;
        let message = status.message.clone().unwrap_or_default();
        if !status.is_ok() {
            bail!("bridge reported status {:?}: {}", status.status, message);
        }
        println!("bridge ok: {message}");
        return Ok(());
    }

    let sync_config = SyncConfig::from_env(cli.vault.clone(), cli.cooldown_ms)?;
    let dates = cli.resolve_dates(chrono::Local::now().date_naive())?;
    tracing::info!(
        vault = %sync_config.vault_root.display(),
        dates = dates.len(),
        "starting sync"
    );

    let vault = Arc::new(FsVault::new(&sync_config.vault_root));
    let syncer = NoteSyncer::new(source, vault, &sync_config.vault_root)
        .with_cooldown(sync_config.cooldown);

    let total = dates.len();
    let mut done = 0usize;
    let report = syncer
        .sync_dates(&dates, |outcome| {
            done += 1;
            if !cli.json {
                println!("[{done}/{total}] {}", progress_line(outcome));
            }
        })
        .await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Sync complete: {} successful, {} failed",
        report.successful(),
        report.failed()
    );
    for (date, error) in report.failures() {
        println!("  {date}: {error}");
    }

    Ok(())
}

fn progress_line(outcome: &DateOutcome) -> String {
    match &outcome.status {
        DateStatus::Synced { path, action } => {
            format!("{} {action} {}", outcome.date, path.display())
        }
        DateStatus::Failed { error } => format!("{} failed: {error}", outcome.date),
    }
}
