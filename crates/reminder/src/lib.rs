//! Reminder evaluation for periodic vehicle service.
//!
//! This crate provides:
//! - the due-date evaluator (pure date arithmetic and the warning decision)
//! - the duplicate guard that suppresses repeat reminders for one due-cycle
//! - the evaluation pass that walks all candidate vehicles
//! - the daily schedule loop driving the pass

pub mod evaluator;
pub mod guard;
pub mod pass;
pub mod schedule;


pub use evaluator::{evaluate, DueAssessment, WarningDecision};
pub use pass::{run_pass, PassSummary};
pub use schedule::{run_daily, DailySchedule};
