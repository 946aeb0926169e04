//! Due-date arithmetic and the warning decision.

use chrono::{Duration, NaiveDate};

/// Outcome of evaluating one vehicle against its service interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueAssessment {
    /// Days elapsed since the last recorded service. Negative when the
    /// recorded service date lies in the future; accepted as-is.
    pub days_since_last: i64,
    /// Days left until the next service is due. Zero or negative means
    /// the service is overdue.
    pub days_until_due: i64,
    /// `last_service_date + interval_days`, independent of today.
    pub due_date: NaiveDate,
    pub last_service_date: NaiveDate,
    pub interval_days: i64,
    pub warning_days_before: i64,
}

/// What the pass should do for an assessed vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningDecision {
    /// Inside the warning window; a reminder should be created.
    Due,
    /// Due date has passed; logged but no reminder (current policy).
    Overdue,
    /// Warning window not yet reached; skipped silently.
    TooEarly,
}

/// Compute the due-date numbers for one vehicle.
///
/// Pure and total over its inputs: `interval_days` and
/// `warning_days_before` are trusted as stored, and a future
/// `last_service_date` simply yields a negative `days_since_last`.
pub fn evaluate(
    interval_days: i64,
    warning_days_before: i64,
    last_service_date: NaiveDate,
    today: NaiveDate,
) -> DueAssessment {
    let days_since_last = (today - last_service_date).num_days();
    DueAssessment {
        days_since_last,
        days_until_due: interval_days - days_since_last,
        due_date: last_service_date + Duration::days(interval_days),
        last_service_date,
        interval_days,
        warning_days_before,
    }
}

impl DueAssessment {
    /// The warning policy: fire exactly when
    /// `0 < days_until_due <= warning_days_before`.
    ///
    /// The lower bound is strict so an already-overdue vehicle takes the
    /// overdue path; the upper bound is inclusive so the reminder fires on
    /// the boundary day itself.
    pub fn decision(&self) -> WarningDecision {
        if self.days_until_due <= 0 {
            WarningDecision::Overdue
        } else if self.days_until_due <= self.warning_days_before {
            WarningDecision::Due
        } else {
            WarningDecision::TooEarly
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn due_date_ignores_today() {
        let last = date(2024, 1, 1);
        for today in [date(2024, 1, 1), date(2024, 3, 26), date(2025, 6, 1)] {
            let a = evaluate(90, 7, last, today);
            assert_eq!(a.due_date, date(2024, 3, 31));
        }
    }

    #[test]
    fn reference_scenario_inside_window() {
        let a = evaluate(90, 7, date(2024, 1, 1), date(2024, 3, 26));
        assert_eq!(a.days_since_last, 85);
        assert_eq!(a.days_until_due, 5);
        assert_eq!(a.due_date, date(2024, 3, 31));
        assert_eq!(a.decision(), WarningDecision::Due);
    }

    #[test]
    fn reference_scenario_overdue() {
        let a = evaluate(90, 7, date(2024, 1, 1), date(2024, 4, 5));
        assert_eq!(a.days_until_due, -5);
        assert_eq!(a.decision(), WarningDecision::Overdue);
    }

    #[test]
    fn boundary_equal_to_window_fires() {
        // days_until_due == warning_days_before
        let a = evaluate(90, 7, date(2024, 1, 1), date(2024, 3, 24));
        assert_eq!(a.days_until_due, 7);
        assert_eq!(a.decision(), WarningDecision::Due);
    }

    #[test]
    fn boundary_one_past_window_is_too_early() {
        // days_until_due == warning_days_before + 1
        let a = evaluate(90, 7, date(2024, 1, 1), date(2024, 3, 23));
        assert_eq!(a.days_until_due, 8);
        assert_eq!(a.decision(), WarningDecision::TooEarly);
    }

    #[test]
    fn boundary_zero_is_overdue_not_due() {
        let a = evaluate(90, 7, date(2024, 1, 1), date(2024, 3, 31));
        assert_eq!(a.days_until_due, 0);
        assert_eq!(a.decision(), WarningDecision::Overdue);
    }

    #[test]
    fn future_service_date_gives_negative_days_since() {
        let a = evaluate(90, 7, date(2024, 6, 1), date(2024, 5, 1));
        assert_eq!(a.days_since_last, -31);
        assert_eq!(a.days_until_due, 121);
        assert_eq!(a.decision(), WarningDecision::TooEarly);
    }

    #[test]
    fn zero_warning_window_never_fires_before_due() {
        let a = evaluate(30, 0, date(2024, 1, 1), date(2024, 1, 30));
        assert_eq!(a.days_until_due, 1);
        assert_eq!(a.decision(), WarningDecision::TooEarly);
        let a = evaluate(30, 0, date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(a.decision(), WarningDecision::Overdue);
    }
}
