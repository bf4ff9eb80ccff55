//! Login and registration DTOs plus the registration wizard rules.

use serde::{Deserialize, Serialize};

use crate::shared::field_errors::FieldErrors;
use crate::shared::stepper::Stepper;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl LoginResponse {
    pub fn user(&self) -> SessionUser {
        SessionUser {
            id: Some(self.user_id),
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user: SessionUser,
}

/// User snapshot kept next to the token in persistent storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SessionUser {
    /// "First Last" when known, otherwise the username.
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() {
            self.username.clone()
        } else {
            full
        }
    }

    /// Up to two letters for the avatar.
    pub fn initials(&self) -> String {
        let first = |s: Option<&str>| s.and_then(|v| v.trim().chars().next());
        match (first(self.first_name.as_deref()), first(self.last_name.as_deref())) {
            (Some(a), Some(b)) => a.to_uppercase().chain(b.to_uppercase()).collect(),
            _ => self.username.chars().take(2).flat_map(char::to_uppercase).collect(),
        }
    }
}

// ============================================================================
// Registration wizard
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegisterField {
    Username,
    Email,
    Password,
    ConfirmPassword,
    FirstName,
    LastName,
}

pub const REGISTER_STEPS: [&str; 3] = ["Dane konta", "Dane osobowe", "Potwierdzenie"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterForm {
    pub fn validate_step(&self, step: usize) -> FieldErrors<RegisterField> {
        let mut errors = FieldErrors::new();
        match step {
            0 => {
                let required = [
                    (RegisterField::Username, &self.username),
                    (RegisterField::Email, &self.email),
                    (RegisterField::Password, &self.password),
                    (RegisterField::ConfirmPassword, &self.confirm_password),
                ];
                for (field, value) in required {
                    if value.is_empty() {
                        errors.insert(field, "Wszystkie pola są wymagane");
                    }
                }
                if !errors.is_empty() {
                    return errors;
                }
                if self.password != self.confirm_password {
                    errors.insert(RegisterField::ConfirmPassword, "Hasła nie są identyczne");
                } else if self.password.chars().count() < MIN_PASSWORD_LEN {
                    errors.insert(
                        RegisterField::Password,
                        "Hasło musi mieć co najmniej 6 znaków",
                    );
                }
            }
            1 => {
                if self.first_name.is_empty() {
                    errors.insert(RegisterField::FirstName, "Imię i nazwisko są wymagane");
                }
                if self.last_name.is_empty() {
                    errors.insert(RegisterField::LastName, "Imię i nazwisko są wymagane");
                }
            }
            _ => {}
        }
        errors
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// Registration form plus its step position.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterWizard {
    pub form: RegisterForm,
    pub errors: FieldErrors<RegisterField>,
    stepper: Stepper,
}

impl Default for RegisterWizard {
    fn default() -> Self {
        Self {
            form: RegisterForm::default(),
            errors: FieldErrors::new(),
            stepper: Stepper::new(REGISTER_STEPS.len()),
        }
    }
}

impl RegisterWizard {
    pub fn step(&self) -> usize {
        self.stepper.active()
    }

    pub fn is_last_step(&self) -> bool {
        self.stepper.is_last()
    }

    pub fn is_step_completed(&self, step: usize) -> bool {
        self.stepper.is_completed(step)
    }

    pub fn advance(&mut self) -> bool {
        self.errors = self.form.validate_step(self.stepper.active());
        self.stepper.advance(self.errors.is_empty())
    }

    pub fn back(&mut self) {
        self.errors.clear_all();
        self.stepper.back();
    }

    pub fn jump_to(&mut self, step: usize) -> bool {
        let moved = self.stepper.jump_to(step);
        if moved {
            self.errors.clear_all();
        }
        moved
    }

    /// First message of the current errors, shown as the step banner.
    pub fn error_message(&self) -> Option<String> {
        self.errors.iter().next().map(|(_, msg)| msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_step(password: &str, confirm: &str) -> RegisterWizard {
        let mut wizard = RegisterWizard::default();
        wizard.form.username = "jan".into();
        wizard.form.email = "jan@example.com".into();
        wizard.form.password = password.into();
        wizard.form.confirm_password = confirm.into();
        wizard
    }

    #[test]
    fn first_step_requires_all_fields() {
        let mut wizard = RegisterWizard::default();
        assert!(!wizard.advance());
        assert_eq!(wizard.error_message().as_deref(), Some("Wszystkie pola są wymagane"));
    }

    #[test]
    fn password_rules() {
        let mut wizard = account_step("secret1", "secret2");
        assert!(!wizard.advance());
        assert!(wizard.errors.has(RegisterField::ConfirmPassword));

        let mut wizard = account_step("abc", "abc");
        assert!(!wizard.advance());
        assert!(wizard.errors.has(RegisterField::Password));

        let mut wizard = account_step("abcdef", "abcdef");
        assert!(wizard.advance());
        assert_eq!(wizard.step(), 1);
    }

    #[test]
    fn second_step_requires_names_then_reaches_summary() {
        let mut wizard = account_step("abcdef", "abcdef");
        wizard.advance();
        wizard.form.first_name = "Jan".into();
        assert!(!wizard.advance());
        wizard.form.last_name = "Kowalski".into();
        assert!(wizard.advance());
        assert!(wizard.is_last_step());
        assert!(wizard.jump_to(0));
        assert!(!wizard.jump_to(2));
    }

    #[test]
    fn login_response_maps_to_session_user() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"token": "t", "user_id": 7, "username": "ala", "first_name": "Ala"}"#,
        )
        .unwrap();
        let user = resp.user();
        assert_eq!(user.id, Some(7));
        assert_eq!(user.display_name(), "Ala");
        assert_eq!(user.initials(), "AL");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let user = SessionUser {
            username: "kowal".into(),
            first_name: Some("Jan".into()),
            last_name: Some("Kowalski".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Jan Kowalski");
        assert_eq!(user.initials(), "JK");
        assert_eq!(SessionUser { username: "kowal".into(), ..Default::default() }.display_name(), "kowal");
    }
}
