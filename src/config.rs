//! Configuration module
//!
//! Settings come from `GOBARBER_*` environment variables. The API base URL is
//! the only required one.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;
use log::{info, warn};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

pub const API_URL_VAR: &str = "GOBARBER_API_URL";
pub const PROVIDER_ID_VAR: &str = "GOBARBER_PROVIDER_ID";
pub const TIMEZONE_VAR: &str = "GOBARBER_TIMEZONE";
pub const SESSION_PATH_VAR: &str = "GOBARBER_SESSION_PATH";

/// The zone appointment hours are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerTimezone {
    /// Whatever the operating system reports.
    System,
    Named(Tz),
}

impl ViewerTimezone {
    /// Expresses `instant` in this zone.
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Self::System => instant.with_timezone(&Local).fixed_offset(),
            Self::Named(tz) => instant.with_timezone(tz).fixed_offset(),
        }
    }
}

impl FromStr for ViewerTimezone {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("local") {
            return Ok(Self::System);
        }
        Tz::from_str(name)
            .map(Self::Named)
            .map_err(|e| AppError::config(format!("unknown timezone '{}': {}", name, e)))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub provider_id: Option<String>,
    pub timezone: ViewerTimezone,
    pub session_path: PathBuf,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let raw_url = env::var(API_URL_VAR)
            .map_err(|_| AppError::config(format!("{} must be set", API_URL_VAR)))?;
        let api_url = validate_api_url(&raw_url)?;

        let provider_id = env::var(PROVIDER_ID_VAR)
            .ok()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let timezone = match env::var(TIMEZONE_VAR) {
            Ok(name) => name.parse()?,
            Err(_) => ViewerTimezone::System,
        };

        let session_path = match env::var(SESSION_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_session_path()?,
        };

        info!(
            "Configuration loaded: api={}, timezone={:?}, session={}",
            api_url,
            timezone,
            session_path.display()
        );

        Ok(Self {
            api_url,
            provider_id,
            timezone,
            session_path,
        })
    }

    /// Current instant expressed in the viewer zone.
    pub fn now_local(&self) -> DateTime<FixedOffset> {
        self.timezone.localize(Utc::now())
    }
}

/// Checks that the API base URL is an absolute http(s) URL with a host.
pub fn validate_api_url(raw: &str) -> AppResult<Url> {
    if raw.trim().is_empty() {
        return Err(AppError::config("API URL cannot be empty"));
    }

    let parsed = Url::parse(raw.trim())
        .map_err(|e| AppError::config(format!("invalid API URL '{}': {}", raw, e)))?;

    match parsed.scheme() {
        "https" => {}
        "http" => warn!("API URL {} is not using HTTPS", parsed),
        other => {
            return Err(AppError::config(format!(
                "API URL must use http or https, got '{}://'",
                other
            )))
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(AppError::config(format!("API URL '{}' has no host", raw)));
    }

    Ok(parsed)
}

fn default_session_path() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("gobarber").join("session.json"))
        .ok_or_else(|| {
            AppError::config(format!(
                "no config directory found, set {}",
                SESSION_PATH_VAR
            ))
        })
}
