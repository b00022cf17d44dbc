// Declare modules
pub mod appointment;
pub mod availability;
pub mod user;

// Flattened so callers can write `crate::models::Appointment`.
pub use appointment::{Appointment, AppointmentPayload, AppointmentUser, AppointmentUserPayload};
pub use availability::{MonthAvailabilityItem, YearMonth};
pub use user::{Session, User};
