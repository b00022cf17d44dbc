// Agenda derivation for the provider dashboard.
// Everything here is pure: callers pass snapshots and the current instant in.

use crate::models::Appointment;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use serde::Serialize;

pub mod availability;
pub mod next;
pub mod partition;
pub mod sort;

pub use availability::{is_day_disabled, is_weekend, unavailable_dates};
pub use next::next_appointment;
pub use partition::{afternoon, morning};
pub use sort::sort_by_hour;

/// A day's appointments split for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Agenda {
    pub morning: Vec<Appointment>,
    pub afternoon: Vec<Appointment>,
    /// Only computed when the selected day is today.
    pub next: Option<Appointment>,
}

impl Agenda {
    pub fn build(
        appointments: Vec<Appointment>,
        now: DateTime<Utc>,
        selected_date: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        let sorted = sort_by_hour(appointments);

        let morning: Vec<Appointment> = morning(&sorted).into_iter().cloned().collect();
        let afternoon: Vec<Appointment> = afternoon(&sorted).into_iter().cloned().collect();

        let next = if selected_date == today {
            next_appointment(&sorted, now).cloned()
        } else {
            None
        };

        debug!(
            "Agenda for {}: {} morning, {} afternoon, next={:?}",
            selected_date,
            morning.len(),
            afternoon.len(),
            next.as_ref().map(|a| a.hour.as_str())
        );

        Self {
            morning,
            afternoon,
            next,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.morning.is_empty() && self.afternoon.is_empty()
    }
}
