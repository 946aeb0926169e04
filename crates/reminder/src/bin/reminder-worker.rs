//! reminder-worker — daily vehicle service reminder checks.
//!
//! Loads backend configuration from the environment, runs one evaluation
//! pass immediately, then repeats the pass once per day at the configured
//! wall-clock time until interrupted.

use std::sync::Arc;

use chrono::{Local, Utc};
use clap::Parser;
use tokio::sync::Notify;
use tracing::{error, info};

use pitstop_core::config::{load_dotenv, Config};
use pitstop_reminder::{run_daily, run_pass, DailySchedule};
use pitstop_supabase::SupabaseClient;

// ── CLI ─────────────────────────────────────────────────────────────

/// Vehicle service reminder worker — creates reminder notifications when a
/// vehicle's next service falls inside its warning window.
#[derive(Parser, Debug)]
#[command(name = "reminder-worker", version, about)]
struct Cli {
    /// Daily run time as HH:MM (overrides CRON_TIME).
    #[arg(long)]
    cron_time: Option<String>,

    /// Run a single pass immediately and exit.
    #[arg(long)]
    once: bool,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    load_dotenv();
    let mut config = Config::from_env()?;
    if let Some(run_at) = cli.cron_time {
        config.schedule.run_at = run_at;
    }
    config.log_summary();

    let schedule = DailySchedule::parse(&config.schedule.run_at)?;
    let store = SupabaseClient::new(&config.supabase)?;

    info!("reminder worker starting");

    if cli.once {
        let summary = run_pass(&store, Utc::now(), Local::now().date_naive()).await?;
        info!(
            vehicles = summary.vehicles,
            created = summary.created,
            skipped = summary.skipped,
            "single pass finished"
        );
        return Ok(());
    }

    // notify_one stores a permit, so an interrupt during a pass still
    // stops the loop at the next iteration.
    let shutdown = Arc::new(Notify::new());
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received, shutting down");
                signal_shutdown.notify_one();
            }
            Err(e) => error!(error = %e, "failed to listen for interrupt"),
        }
    });

    run_daily(&schedule, shutdown, || {
        run_pass(&store, Utc::now(), Local::now().date_naive())
    })
    .await?;
    info!("reminder worker exited cleanly");

    Ok(())
}
