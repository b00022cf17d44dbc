// Typed boundary for API response bodies.
// Anything that does not match the expected shape is a `Parse` error; nothing is coerced.

use crate::config::ViewerTimezone;
use crate::error::{AppError, AppResult};
use crate::models::{Appointment, AppointmentPayload, MonthAvailabilityItem, Session, User};
use chrono::Local;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SessionPayload {
    token: String,
    user: User,
}

pub fn parse_month_availability(body: &str) -> AppResult<Vec<MonthAvailabilityItem>> {
    serde_json::from_str(body)
        .map_err(|e| AppError::parse(format!("month availability: {}", e)))
}

/// Parses `GET /appointments/me` and derives each `hour` in `viewer_tz`.
pub fn parse_appointments(body: &str, viewer_tz: ViewerTimezone) -> AppResult<Vec<Appointment>> {
    let payloads: Vec<AppointmentPayload> = serde_json::from_str(body)
        .map_err(|e| AppError::parse(format!("appointments: {}", e)))?;

    payloads
        .into_iter()
        .map(|payload| match viewer_tz {
            ViewerTimezone::System => Appointment::from_payload(payload, &Local),
            ViewerTimezone::Named(tz) => Appointment::from_payload(payload, &tz),
        })
        .collect()
}

pub fn parse_session(body: &str) -> AppResult<Session> {
    let payload: SessionPayload =
        serde_json::from_str(body).map_err(|e| AppError::parse(format!("session: {}", e)))?;
    if payload.token.trim().is_empty() {
        return Err(AppError::parse("session: empty token"));
    }
    Ok(Session::new(payload.token, payload.user))
}

pub fn parse_user(body: &str) -> AppResult<User> {
    serde_json::from_str(body).map_err(|e| AppError::parse(format!("user: {}", e)))
}
