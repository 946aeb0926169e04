//! Daily schedule driving the evaluation pass.
//!
//! The configured `HH:MM` wall-clock time is normalised into a six-field
//! cron expression (the `cron` crate wants `sec min hour dom month dow`)
//! and the next tick is resolved with [`Schedule::after`]. The pass itself
//! knows nothing about timing.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Local};
use cron::Schedule;
use tokio::sync::Notify;
use tracing::{error, info};

use pitstop_core::error::PitstopError;

use crate::pass::PassSummary;

/// A once-per-day schedule at a fixed local wall-clock time.
#[derive(Debug, Clone)]
pub struct DailySchedule {
    schedule: Schedule,
    run_at: String,
}

impl DailySchedule {
    /// Parse an `HH:MM` time into a daily schedule.
    pub fn parse(run_at: &str) -> Result<Self, PitstopError> {
        let (hour, minute) = parse_hh_mm(run_at)
            .ok_or_else(|| PitstopError::Config(format!("invalid run time: {run_at:?}")))?;
        let expression = format!("0 {} {} * * *", minute, hour);
        let schedule = Schedule::from_str(&expression)
            .map_err(|e| PitstopError::Config(format!("invalid run time {run_at:?}: {e}")))?;
        Ok(Self {
            schedule,
            run_at: run_at.to_string(),
        })
    }

    /// The configured `HH:MM` string, for logs.
    pub fn run_at(&self) -> &str {
        &self.run_at
    }

    /// Next scheduled instant strictly after `after`.
    pub fn next_run(&self, after: DateTime<Local>) -> Option<DateTime<Local>> {
        self.schedule.after(&after).next()
    }
}

fn parse_hh_mm(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.trim().split_once(':')?;
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    if hour < 24 && minute < 60 {
        Some((hour, minute))
    } else {
        None
    }
}

/// Run the pass once immediately, then once per day at the scheduled time,
/// until `shutdown` is notified.
///
/// The shutdown notify stores a permit, so a notification arriving while a
/// pass is running (when nothing is waiting on it) still stops the loop at
/// the next iteration instead of being lost.
///
/// A pass-level error is logged and the loop keeps going; the next
/// scheduled run proceeds normally.
pub async fn run_daily<F, Fut>(
    schedule: &DailySchedule,
    shutdown: Arc<Notify>,
    mut pass: F,
) -> Result<(), PitstopError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PassSummary, PitstopError>>,
{
    info!(run_at = %schedule.run_at(), "daily schedule active, running initial pass");
    log_pass_result(pass().await);

    loop {
        let now = Local::now();
        let Some(next) = schedule.next_run(now) else {
            return Err(PitstopError::Other(
                "schedule yields no further run times".to_string(),
            ));
        };
        let wait = (next - now)
            .to_std()
            .unwrap_or_else(|_| std::time::Duration::from_secs(0));
        info!(next_run = %next, "waiting for next scheduled pass");

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                log_pass_result(pass().await);
            }
            _ = shutdown.notified() => {
                info!("shutdown requested, stopping schedule loop");
                return Ok(());
            }
        }
    }
}

fn log_pass_result(result: Result<PassSummary, PitstopError>) {
    match result {
        Ok(summary) => info!(
            vehicles = summary.vehicles,
            created = summary.created,
            skipped = summary.skipped,
            "pass finished"
        ),
        Err(e) => error!(error = %e, "pass failed"),
    }
}
