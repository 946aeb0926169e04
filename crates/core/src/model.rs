//! Row types exchanged with the backend.
//!
//! Field names follow the backend schema: the `get_vehicles_for_reminder`
//! RPC row, the `services` table (Gregorian date column), and the
//! `notifications` table with its `type` discriminator.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Notification type tag for service reminders.
pub const REMINDER_KIND: &str = "reminder";

/// A vehicle eligible for reminder evaluation, as returned by the
/// `get_vehicles_for_reminder` RPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_id: Uuid,
    pub user_id: Uuid,
    pub model: String,
    pub plate_number: String,
    /// Service interval in days (> 0, trusted as stored).
    pub interval_days: i64,
    /// Days before the due date during which a reminder should fire (>= 0).
    pub warning_days_before: i64,
}

/// One recorded service visit. Only the most recent row per vehicle
/// matters to the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub vehicle_id: Uuid,
    #[serde(rename = "service_date_gregorian")]
    pub service_date: NaiveDate,
}

/// Strongly typed metadata attached to every reminder notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderMetadata {
    pub vehicle_model: String,
    pub plate_number: String,
    pub days_until_due: i64,
    pub interval_days: i64,
    pub last_service_date: NaiveDate,
    pub due_date: NaiveDate,
    pub warning_days_before: i64,
}

/// Insert payload for a new reminder notification. `read` and
/// `created_at` are backend column defaults.
#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub title: String,
    pub body: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub metadata: ReminderMetadata,
}

/// A stored notification row as fetched from the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub title: String,
    pub body: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    /// `None` when the stored JSON is null or does not match the
    /// reminder shape; such rows never satisfy the duplicate guard.
    #[serde(default, deserialize_with = "lenient_metadata")]
    pub metadata: Option<ReminderMetadata>,
}

fn lenient_metadata<'de, D>(deserializer: D) -> Result<Option<ReminderMetadata>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
