//! Data-access seam between the reminder pass and the backend.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::PitstopError;
use crate::model::{NewNotification, Notification, ServiceRecord, Vehicle};

/// Backend operations consumed by the reminder pass.
///
/// Implemented over PostgREST by `pitstop-supabase`; tests substitute an
/// in-memory double.
#[async_trait::async_trait]
pub trait VehicleStore: Send + Sync {
    /// All vehicles with reminder settings that should be evaluated.
    async fn list_vehicles_due_for_check(&self) -> Result<Vec<Vehicle>, PitstopError>;

    /// The most recent service row for a vehicle, if any.
    async fn latest_service(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<ServiceRecord>, PitstopError>;

    /// Unread reminder notifications for a vehicle created at or after `since`.
    async fn recent_unread_reminders(
        &self,
        vehicle_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Notification>, PitstopError>;

    /// Insert a notification row. `Ok(None)` means the backend accepted the
    /// request but returned no row; callers treat that as a failed insert.
    async fn insert_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Option<Notification>, PitstopError>;
}
