// Client for the remote scheduling API.
// Handles transport and status codes; body parsing lives in `payloads`.

use crate::config::{Config, ViewerTimezone};
use crate::error::{AppError, AppResult};
use crate::forms::{ForgotPasswordForm, ProfileForm, ResetPasswordForm, SignInForm, SignUpForm};
use crate::http_config::HttpConfig;
use crate::models::{Appointment, MonthAvailabilityItem, Session, User, YearMonth};
use crate::utils::logging::{log_fetch, log_request_failure};
use crate::utils::retry::{retry_with_exponential_backoff, RetryConfig};
use chrono::{Datelike, NaiveDate};
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde_json::json;
use std::time::Instant;
use url::Url;

pub mod payloads;

pub use payloads::{parse_appointments, parse_month_availability, parse_session, parse_user};

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    retry: RetryConfig,
}

impl ApiClient {
    pub fn new(config: &Config, http: &HttpConfig) -> AppResult<Self> {
        Self::with_base_url(config.api_url.clone(), http)
    }

    pub fn with_base_url(base_url: Url, http: &HttpConfig) -> AppResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::config(format!("'{}' cannot be used as API base", base_url)));
        }
        Ok(Self {
            client: http.build_client()?,
            base_url,
            token: None,
            retry: http.to_retry_config(),
        })
    }

    /// Sends `Authorization: Bearer <token>` on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_session(self, session: &Session) -> Self {
        self.with_token(session.token.clone())
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::config(format!("'{}' cannot be used as API base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> AppResult<String> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            log_request_failure(operation, &e);
            AppError::Network(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            debug!("{} returned {}: {}", operation, status, body);
            return Err(AppError::api(status.as_u16(), body));
        }
        Ok(body)
    }

    async fn get(&self, operation: &str, url: Url, query: &[(&str, String)]) -> AppResult<String> {
        retry_with_exponential_backoff(&self.retry, || {
            self.send(operation, self.client.get(url.clone()).query(query))
        })
        .await
    }

    pub async fn month_availability(
        &self,
        provider_id: &str,
        month: YearMonth,
    ) -> AppResult<Vec<MonthAvailabilityItem>> {
        if provider_id.trim().is_empty() {
            return Err(AppError::invalid_input("provider id cannot be empty"));
        }
        let started = Instant::now();
        let url = self.endpoint(&["providers", provider_id, "month-availability"])?;
        let query = [
            ("year", month.year().to_string()),
            ("month", month.month().to_string()),
        ];

        let body = self.get("month availability", url, &query).await?;
        let items = parse_month_availability(&body)?;
        log_fetch("availability days", items.len(), started.elapsed().as_millis());
        Ok(items)
    }

    pub async fn appointments_for_day(
        &self,
        date: NaiveDate,
        viewer_tz: ViewerTimezone,
    ) -> AppResult<Vec<Appointment>> {
        let started = Instant::now();
        let url = self.endpoint(&["appointments", "me"])?;
        let query = [
            ("year", date.year().to_string()),
            ("month", date.month().to_string()),
            ("day", date.day().to_string()),
        ];

        let body = self.get("appointments", url, &query).await?;
        let appointments = parse_appointments(&body, viewer_tz)?;
        log_fetch("appointments", appointments.len(), started.elapsed().as_millis());
        Ok(appointments)
    }

    pub async fn sign_in(&self, form: &SignInForm) -> AppResult<Session> {
        form.validate()?;
        let url = self.endpoint(&["sessions"])?;
        let body = json!({ "email": form.email.trim(), "password": form.password });

        let response = self
            .send("sign in", self.client.post(url).json(&body))
            .await
            .map_err(|e| match e {
                AppError::Api { status: 401, .. } => AppError::auth("Invalid e-mail or password"),
                other => other,
            })?;
        let session = parse_session(&response)?;
        info!("Signed in as '{}'", session.user.name);
        Ok(session)
    }

    pub async fn sign_up(&self, form: &SignUpForm) -> AppResult<()> {
        form.validate()?;
        let url = self.endpoint(&["users"])?;
        let body = json!({
            "name": form.name.trim(),
            "email": form.email.trim(),
            "password": form.password,
        });
        self.send("sign up", self.client.post(url).json(&body)).await?;
        Ok(())
    }

    pub async fn forgot_password(&self, form: &ForgotPasswordForm) -> AppResult<()> {
        form.validate()?;
        let url = self.endpoint(&["password", "forgot"])?;
        let body = json!({ "email": form.email.trim() });
        self.send("forgot password", self.client.post(url).json(&body)).await?;
        Ok(())
    }

    pub async fn reset_password(&self, form: &ResetPasswordForm) -> AppResult<()> {
        form.validate()?;
        let url = self.endpoint(&["password", "reset"])?;
        let body = json!({
            "password": form.password,
            "passwordConfirm": form.password_confirm,
            "token": form.token,
        });
        self.send("reset password", self.client.post(url).json(&body)).await?;
        Ok(())
    }

    /// Returns the user as stored by the server.
    pub async fn update_profile(&self, form: ProfileForm) -> AppResult<User> {
        form.validate()?;
        if self.token.is_none() {
            return Err(AppError::auth("profile update requires a signed-in session"));
        }
        let url = self.endpoint(&["profile", "update"])?;
        let update = form.into_update();
        let response = self
            .send("update profile", self.client.put(url).json(&update))
            .await?;
        parse_user(&response)
    }

    /// Uploads a new avatar as the `avatar` multipart field and returns the
    /// updated user. Callers persist it with `SessionStore::update_user`.
    pub async fn update_avatar(&self, file_name: &str, bytes: Vec<u8>) -> AppResult<User> {
        if self.token.is_none() {
            return Err(AppError::auth("avatar upload requires a signed-in session"));
        }
        if bytes.is_empty() {
            return Err(AppError::invalid_input("avatar file is empty"));
        }
        let url = self.endpoint(&["users", "avatar"])?;
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(avatar_mime(file_name))?;
        let form = Form::new().part("avatar", part);

        let response = self
            .send("update avatar", self.client.patch(url).multipart(form))
            .await?;
        let user = parse_user(&response)?;
        info!("Avatar updated for '{}'", user.name);
        Ok(user)
    }
}

fn avatar_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
