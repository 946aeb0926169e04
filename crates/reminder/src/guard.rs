//! Duplicate suppression for one due-cycle.
//!
//! A reminder for a vehicle is considered already sent when an unread
//! `reminder` notification created inside the recent window carries the
//! same `days_until_due` in its metadata. This is a heuristic: nothing at
//! the storage layer enforces it, and concurrent passes could race. The
//! single-process daily schedule keeps that from mattering in practice.

use chrono::{DateTime, Duration, Utc};

use pitstop_core::model::Notification;

/// Start of the lookback window for duplicate detection:
/// `now - (warning_days_before + 1)` days.
pub fn dedup_window_start(now: DateTime<Utc>, warning_days_before: i64) -> DateTime<Utc> {
    now - Duration::days(warning_days_before + 1)
}

/// Whether any existing notification already covers this `days_until_due`.
///
/// Rows without metadata (or with metadata of a foreign shape) never match.
pub fn already_notified(existing: &[Notification], days_until_due: i64) -> bool {
    existing.iter().any(|n| {
        n.metadata
            .as_ref()
            .is_some_and(|m| m.days_until_due == days_until_due)
    })
}
