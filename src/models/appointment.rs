// file: src/models/appointment.rs
use crate::error::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// Wire shape of one entry of `GET /appointments/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentPayload {
    pub id: String,
    pub date: String,
    pub user: AppointmentUserPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentUserPayload {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentUser {
    pub name: String,
    /// `None` means the placeholder avatar should be shown.
    pub avatar: Option<String>,
}

/// An appointment as seen by the viewer.
///
/// `date` carries the viewer's UTC offset at fetch time and `hour` is its
/// `HH:mm` rendering. Neither is recomputed after construction, so a
/// timezone change on the viewer side is not reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub date: DateTime<FixedOffset>,
    pub hour: String,
    pub user: AppointmentUser,
}

impl Appointment {
    /// Builds an appointment from an instant already expressed in the viewer zone.
    pub fn new(id: impl Into<String>, date: DateTime<FixedOffset>, user: AppointmentUser) -> Self {
        let hour = date.format("%H:%M").to_string();
        Self {
            id: id.into(),
            date,
            hour,
            user,
        }
    }

    pub fn from_payload<Tz: TimeZone>(payload: AppointmentPayload, viewer_tz: &Tz) -> AppResult<Self> {
        let parsed = DateTime::parse_from_rfc3339(payload.date.trim()).map_err(|e| {
            AppError::parse(format!(
                "appointment {} has an invalid date '{}': {}",
                payload.id, payload.date, e
            ))
        })?;
        let date = parsed.with_timezone(viewer_tz).fixed_offset();

        let avatar = payload
            .user
            .avatar_url
            .filter(|url| !url.trim().is_empty());

        Ok(Self::new(
            payload.id,
            date,
            AppointmentUser {
                name: payload.user.name,
                avatar,
            },
        ))
    }

    /// Hour of day in the viewer zone, taken from `date` rather than `hour`.
    pub fn local_hour(&self) -> u32 {
        self.date.hour()
    }
}
