// GoBarber schedule library
// Appointment agenda and calendar availability for the provider dashboard,
// plus the typed client for the scheduling API it reads from.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod http_config;
pub mod models;
pub mod schedule;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::{Config, ViewerTimezone};
pub use dashboard::Dashboard;
pub use error::{AppError, AppResult};
pub use models::*;
pub use schedule::{
    afternoon, is_day_disabled, is_weekend, morning, next_appointment, sort_by_hour,
    unavailable_dates, Agenda,
};
pub use session::SessionStore;
