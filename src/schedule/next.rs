use crate::models::Appointment;
use chrono::{DateTime, Utc};

/// First appointment, in input order, that starts strictly after `now`.
///
/// This is a linear first-match scan, not a minimum search: pass the list
/// through [`sort_by_hour`](super::sort_by_hour) first to get the earliest
/// upcoming appointment.
pub fn next_appointment(appointments: &[Appointment], now: DateTime<Utc>) -> Option<&Appointment> {
    appointments
        .iter()
        .find(|appointment| appointment.date.with_timezone(&Utc) > now)
}
