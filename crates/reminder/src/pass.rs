//! One evaluation pass over all candidate vehicles.
//!
//! Vehicles are processed sequentially; a failure on one vehicle is
//! logged and counted, never aborting the rest of the pass.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{error, info, warn};

use pitstop_core::error::PitstopError;
use pitstop_core::model::{NewNotification, Vehicle, REMINDER_KIND};
use pitstop_core::store::VehicleStore;

use crate::evaluator::{evaluate, DueAssessment, WarningDecision};
use crate::guard::{already_notified, dedup_window_start};

/// Counts reported at the end of a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Vehicles returned by the backend for evaluation.
    pub vehicles: usize,
    /// Notifications inserted.
    pub created: usize,
    /// Vehicles that produced no notification (any reason).
    pub skipped: usize,
}

/// Why a vehicle produced no new notification.
#[derive(Debug)]
enum Skip {
    NoServiceHistory,
    AlreadyNotified,
    Overdue(i64),
    TooEarly(i64),
    InsertReturnedNothing,
}

/// Run one full evaluation pass against the store.
///
/// `now` anchors the duplicate-detection window; `today` is the calendar
/// date the due arithmetic runs against and must be the local wall-clock
/// date (the schedule fires at local time, so the UTC date can lag or
/// lead it by a day).
///
/// Fails only when the vehicle list itself cannot be fetched; every
/// per-vehicle error is caught, logged, and counted as skipped.
pub async fn run_pass<S>(
    store: &S,
    now: DateTime<Utc>,
    today: NaiveDate,
) -> Result<PassSummary, PitstopError>
where
    S: VehicleStore + ?Sized,
{
    info!(now = %now, today = %today, "starting reminder pass");

    let vehicles = store.list_vehicles_due_for_check().await?;
    let mut summary = PassSummary {
        vehicles: vehicles.len(),
        ..PassSummary::default()
    };

    if vehicles.is_empty() {
        info!("no vehicles to check");
        return Ok(summary);
    }
    info!(count = vehicles.len(), "vehicles to check");

    for vehicle in &vehicles {
        match check_vehicle(store, vehicle, now, today).await {
            Ok(None) => summary.created += 1,
            Ok(Some(skip)) => {
                summary.skipped += 1;
                log_skip(vehicle, &skip);
            }
            Err(e) => {
                summary.skipped += 1;
                error!(
                    model = %vehicle.model,
                    plate = %vehicle.plate_number,
                    error = %e,
                    "failed to process vehicle"
                );
            }
        }
    }

    info!(
        created = summary.created,
        skipped = summary.skipped,
        "reminder pass complete"
    );
    Ok(summary)
}

/// Evaluate one vehicle. `Ok(None)` means a notification was created.
async fn check_vehicle<S>(
    store: &S,
    vehicle: &Vehicle,
    now: DateTime<Utc>,
    today: NaiveDate,
) -> Result<Option<Skip>, PitstopError>
where
    S: VehicleStore + ?Sized,
{
    let Some(service) = store.latest_service(vehicle.vehicle_id).await? else {
        return Ok(Some(Skip::NoServiceHistory));
    };

    let assessment = evaluate(
        vehicle.interval_days,
        vehicle.warning_days_before,
        service.service_date,
        today,
    );
    info!(
        model = %vehicle.model,
        plate = %vehicle.plate_number,
        last_service = %assessment.last_service_date,
        days_since_last = assessment.days_since_last,
        interval_days = assessment.interval_days,
        days_until_due = assessment.days_until_due,
        warning_days_before = assessment.warning_days_before,
        "evaluated vehicle"
    );

    match assessment.decision() {
        WarningDecision::Overdue => Ok(Some(Skip::Overdue(assessment.days_until_due))),
        WarningDecision::TooEarly => Ok(Some(Skip::TooEarly(assessment.days_until_due))),
        WarningDecision::Due => {
            let since = dedup_window_start(now, vehicle.warning_days_before);
            let existing = store
                .recent_unread_reminders(vehicle.vehicle_id, since)
                .await?;
            if already_notified(&existing, assessment.days_until_due) {
                return Ok(Some(Skip::AlreadyNotified));
            }

            let notification = build_notification(vehicle, &assessment);
            match store.insert_notification(&notification).await? {
                Some(_) => {
                    info!(
                        model = %vehicle.model,
                        plate = %vehicle.plate_number,
                        days_until_due = assessment.days_until_due,
                        due_date = %assessment.due_date,
                        "reminder notification created"
                    );
                    Ok(None)
                }
                None => Ok(Some(Skip::InsertReturnedNothing)),
            }
        }
    }
}

fn log_skip(vehicle: &Vehicle, skip: &Skip) {
    match skip {
        Skip::NoServiceHistory => warn!(
            model = %vehicle.model,
            plate = %vehicle.plate_number,
            "no service history recorded, skipping"
        ),
        Skip::AlreadyNotified => info!(
            model = %vehicle.model,
            plate = %vehicle.plate_number,
            "already notified for this due cycle"
        ),
        Skip::Overdue(days) => warn!(
            model = %vehicle.model,
            plate = %vehicle.plate_number,
            days_until_due = days,
            "service is overdue"
        ),
        Skip::TooEarly(days) => info!(
            model = %vehicle.model,
            plate = %vehicle.plate_number,
            days_until_due = days,
            "outside warning window"
        ),
        Skip::InsertReturnedNothing => error!(
            model = %vehicle.model,
            plate = %vehicle.plate_number,
            "insert returned no row, notification not created"
        ),
    }
}

/// Build the insert payload for a due vehicle.
pub(crate) fn build_notification(vehicle: &Vehicle, assessment: &DueAssessment) -> NewNotification {
    NewNotification {
        user_id: vehicle.user_id,
        vehicle_id: vehicle.vehicle_id,
        title: "Scheduled service reminder".to_string(),
        body: format!(
            "Vehicle {} ({}) is due for scheduled service: {} day(s) left of the {}-day interval.",
            vehicle.model,
            vehicle.plate_number,
            assessment.days_until_due,
            assessment.interval_days,
        ),
        kind: REMINDER_KIND.to_string(),
        metadata: pitstop_core::model::ReminderMetadata {
            vehicle_model: vehicle.model.clone(),
            plate_number: vehicle.plate_number.clone(),
            days_until_due: assessment.days_until_due,
            interval_days: assessment.interval_days,
            last_service_date: assessment.last_service_date,
            due_date: assessment.due_date,
            warning_days_before: assessment.warning_days_before,
        },
    }
}
