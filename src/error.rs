use crate::forms::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed payload: {0}")]
    Parse(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Session storage error: {0}")]
    Session(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl AppError {
    pub fn api<S: Into<String>>(status: u16, msg: S) -> Self {
        Self::Api {
            status,
            message: msg.into(),
        }
    }

    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    pub fn auth<S: Into<String>>(msg: S) -> Self {
        Self::Auth(msg.into())
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the message can be shown to the user as-is.
    pub fn is_pii_safe(&self) -> bool {
        match self {
            Self::Network(_) | Self::Session(_) | Self::Api { .. } => false,
            Self::Parse(_)
            | Self::Validation(_)
            | Self::Auth(_)
            | Self::InvalidInput(_)
            | Self::Config(_) => true,
        }
    }

    pub fn to_safe_string(&self) -> String {
        if self.is_pii_safe() {
            self.to_string()
        } else {
            match self {
                Self::Network(_) => "Network request failed".to_string(),
                Self::Api { status, .. } => format!("Request rejected by server ({})", status),
                Self::Session(_) => "Could not access the saved session".to_string(),
                _ => self.to_string(),
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
