//! Form validation for the authentication and profile screens
//!
//! Every rule is checked and all failures are collected per field, so a form
//! can highlight each offending input at once. Messages are the ones shown to
//! end users.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern is valid");
}

pub const MIN_SIGN_UP_PASSWORD_LEN: usize = 8;

/// Field name to first error message for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already has one.
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

fn require(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

fn require_email(errors: &mut ValidationErrors, value: &str, required: &str, invalid: &str) {
    require(errors, "email", value, required);
    if !value.trim().is_empty() && !is_valid_email(value) {
        errors.add("email", invalid);
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_email(&mut errors, &self.email, "E-mail obrigatório", "Digite um e-mail válido");
        require(&mut errors, "password", &self.password, "Senha obrigatória");
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name, "Nome é obrigatório");
        require_email(&mut errors, &self.email, "Email é obrigatório", "Digite um email válido");
        if self.password.chars().count() < MIN_SIGN_UP_PASSWORD_LEN {
            errors.add("password", "A senha precisa ter no mínimo 8 dígitos");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_email(&mut errors, &self.email, "E-mail obrigatório", "Digite um e-mail válido");
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub password: String,
    pub password_confirm: String,
    /// Token taken from the reset link.
    pub token: Option<String>,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "password", &self.password, "Digite a senha");
        if self.password_confirm != self.password {
            errors.add("password_confirm", "Confirmação de senha incorreta");
        }
        if self.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            errors.add("token", "Um token é necessário para realizar essa ação");
        }
        errors.into_result()
    }
}

/// Extracts the reset token from a link query such as `?token=abc`.
pub fn token_from_query(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == "token")
        .map(|(_, token)| token.into_owned())
        .filter(|token| !token.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub old_password: String,
    pub password: String,
    pub password_confirm: String,
}

/// Body of `PUT /profile/update`. Password fields are only sent when the user
/// typed their current password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirm: Option<String>,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name, "Nome obrigatório");
        require_email(&mut errors, &self.email, "E-mail obrigatório", "Digite um e-mail válido");

        if self.changes_password() {
            require(&mut errors, "password", &self.password, "Informe sua nova senha");
            require(
                &mut errors,
                "password_confirm",
                &self.password_confirm,
                "Confirme sua senha",
            );
        }
        if self.password_confirm != self.password {
            errors.add("password_confirm", "Confirmação incorreta");
        }
        errors.into_result()
    }

    pub fn changes_password(&self) -> bool {
        !self.old_password.is_empty()
    }

    pub fn into_update(self) -> ProfileUpdate {
        if self.changes_password() {
            ProfileUpdate {
                name: self.name,
                email: self.email,
                old_password: Some(self.old_password),
                password: Some(self.password),
                password_confirm: Some(self.password_confirm),
            }
        } else {
            ProfileUpdate {
                name: self.name,
                email: self.email,
                old_password: None,
                password: None,
                password_confirm: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ana.souza@example.com.br"));
        assert!(!is_valid_email("ana@"));
        assert!(!is_valid_email("not-an-email"));
    }

    #[test]
    fn test_sign_in_collects_every_field() {
        let errors = SignInForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("E-mail obrigatório"));
        assert_eq!(errors.get("password"), Some("Senha obrigatória"));
    }

    #[test]
    fn test_sign_up_password_length() {
        let form = SignUpForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "1234567".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password"), Some("A senha precisa ter no mínimo 8 dígitos"));

        let form = SignUpForm {
            password: "12345678".to_string(),
            ..form
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_invalid_email_reports_format_not_required() {
        let form = ForgotPasswordForm {
            email: "ana.example.com".to_string(),
        };
        assert_eq!(form.validate().unwrap_err().get("email"), Some("Digite um e-mail válido"));
    }

    #[test]
    fn test_reset_password_requires_matching_confirmation_and_token() {
        let form = ResetPasswordForm {
            password: "new-secret".to_string(),
            password_confirm: "other".to_string(),
            token: None,
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password_confirm"), Some("Confirmação de senha incorreta"));
        assert!(errors.get("token").is_some());
        assert!(errors.get("password").is_none());
    }

    #[test]
    fn test_token_from_query() {
        assert_eq!(token_from_query("?token=abc123"), Some("abc123".to_string()));
        assert_eq!(token_from_query("?lang=pt&token=xyz"), Some("xyz".to_string()));
        assert_eq!(token_from_query("?token="), None);
        assert_eq!(token_from_query(""), None);
    }

    #[test]
    fn test_token_from_query_decodes_percent_escapes() {
        assert_eq!(token_from_query("?token=a%2Bb%3D"), Some("a+b=".to_string()));
        assert_eq!(
            token_from_query("token=eyJhbGciOi%2F%2Fx&lang=pt"),
            Some("eyJhbGciOi//x".to_string())
        );
    }

    #[test]
    fn test_profile_without_password_change() {
        let form = ProfileForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            ..ProfileForm::default()
        };
        assert!(form.validate().is_ok());

        let update = form.into_update();
        assert!(update.old_password.is_none());
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Ana", "email": "ana@example.com"}));
    }

    #[test]
    fn test_profile_password_change_requires_new_password() {
        let form = ProfileForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            old_password: "old-secret".to_string(),
            ..ProfileForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password"), Some("Informe sua nova senha"));
        assert_eq!(errors.get("password_confirm"), Some("Confirme sua senha"));
    }

    #[test]
    fn test_profile_confirmation_mismatch() {
        let form = ProfileForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            old_password: "old-secret".to_string(),
            password: "new-secret".to_string(),
            password_confirm: "new-secreT".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password_confirm"), Some("Confirmação incorreta"));

        let update = ProfileForm {
            password_confirm: "new-secret".to_string(),
            ..form
        }
        .into_update();
        assert_eq!(update.password.as_deref(), Some("new-secret"));
    }
}
