//! [`VehicleStore`] implementation over PostgREST.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use pitstop_core::error::PitstopError;
use pitstop_core::model::{
    NewNotification, Notification, ServiceRecord, Vehicle, REMINDER_KIND,
};
use pitstop_core::store::VehicleStore;

use crate::client::SupabaseClient;

/// PostgREST `eq.` filter value.
fn eq<T: std::fmt::Display>(value: T) -> String {
    format!("eq.{value}")
}

/// PostgREST `gte.` filter on an RFC 3339 timestamp.
fn gte_timestamp(instant: DateTime<Utc>) -> String {
    format!("gte.{}", instant.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[async_trait::async_trait]
impl VehicleStore for SupabaseClient {
    async fn list_vehicles_due_for_check(&self) -> Result<Vec<Vehicle>, PitstopError> {
        // RPC calls are always POST under PostgREST, even without arguments.
        let vehicles: Vec<Vehicle> = self
            .post_rows(&self.rpc_url("get_vehicles_for_reminder"), &json!({}), false)
            .await?;
        debug!(count = vehicles.len(), "fetched vehicles for reminder check");
        Ok(vehicles)
    }

    async fn latest_service(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<ServiceRecord>, PitstopError> {
        let rows: Vec<ServiceRecord> = self
            .get_rows(
                &self.table_url("services"),
                &[
                    ("vehicle_id", eq(vehicle_id)),
                    ("order", "service_date_gregorian.desc".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn recent_unread_reminders(
        &self,
        vehicle_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Notification>, PitstopError> {
        self.get_rows(
            &self.table_url("notifications"),
            &[
                ("vehicle_id", eq(vehicle_id)),
                ("type", eq(REMINDER_KIND)),
                ("read", eq(false)),
                ("created_at", gte_timestamp(since)),
            ],
        )
        .await
    }

    async fn insert_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Option<Notification>, PitstopError> {
        let rows: Vec<Notification> = self
            .post_rows(&self.table_url("notifications"), notification, true)
            .await?;
        Ok(rows.into_iter().next())
    }
}
