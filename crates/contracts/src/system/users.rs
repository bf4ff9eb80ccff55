use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::auth::MIN_PASSWORD_LEN;
use crate::shared::field_errors::FieldErrors;

/// Text the user must type to enable account deletion. Compared exactly.
pub const ACCOUNT_DELETE_PHRASE: &str = "USUŃ KONTO";
pub const MIN_USERNAME_LEN: usize = 3;

static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

fn looks_like_email(value: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value))
}

/// `/users/me/` payload. Older servers send camelCase names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "firstName")]
    pub first_name: String,
    #[serde(default, alias = "lastName")]
    pub last_name: String,
}

/// Only the fields that changed are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateProfileDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UpdateProfileDto {
    pub fn is_empty(&self) -> bool {
        self == &UpdateProfileDto::default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProfileField {
    FirstName,
    LastName,
    Username,
    Email,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            username: profile.username.clone(),
            email: profile.email.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
        }
    }

    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::FirstName => self.first_name = value,
            ProfileField::LastName => self.last_name = value,
            ProfileField::Username => self.username = value,
            ProfileField::Email => self.email = value,
        }
    }

    pub fn validate(&self) -> FieldErrors<ProfileField> {
        let mut errors = FieldErrors::new();
        if self.first_name.trim().is_empty() {
            errors.insert(ProfileField::FirstName, "Imię jest wymagane");
        }
        if self.last_name.trim().is_empty() {
            errors.insert(ProfileField::LastName, "Nazwisko jest wymagane");
        }
        if self.username.trim().is_empty() {
            errors.insert(ProfileField::Username, "Nazwa użytkownika jest wymagana");
        } else if self.username.chars().count() < MIN_USERNAME_LEN {
            errors.insert(
                ProfileField::Username,
                "Nazwa użytkownika musi mieć co najmniej 3 znaki",
            );
        }
        if self.email.trim().is_empty() {
            errors.insert(ProfileField::Email, "Email jest wymagany");
        } else if !looks_like_email(&self.email) {
            errors.insert(ProfileField::Email, "Nieprawidłowy format email");
        }
        errors
    }

    pub fn changes_from(&self, saved: &UserProfile) -> UpdateProfileDto {
        let changed = |new: &str, old: &str| (new != old).then(|| new.to_string());
        UpdateProfileDto {
            username: changed(&self.username, &saved.username),
            email: changed(&self.email, &saved.email),
            first_name: changed(&self.first_name, &saved.first_name),
            last_name: changed(&self.last_name, &saved.last_name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordField {
    Current,
    New,
    Confirm,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    pub fn set(&mut self, field: PasswordField, value: String) {
        match field {
            PasswordField::Current => self.current_password = value,
            PasswordField::New => self.new_password = value,
            PasswordField::Confirm => self.confirm_password = value,
        }
    }

    pub fn validate(&self) -> FieldErrors<PasswordField> {
        let mut errors = FieldErrors::new();
        if self.current_password.is_empty() {
            errors.insert(PasswordField::Current, "Aktualne hasło jest wymagane");
        }
        if self.new_password.is_empty() {
            errors.insert(PasswordField::New, "Nowe hasło jest wymagane");
        } else if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(PasswordField::New, "Hasło musi mieć co najmniej 6 znaków");
        }
        if self.confirm_password.is_empty() {
            errors.insert(PasswordField::Confirm, "Potwierdzenie hasła jest wymagane");
        } else if self.new_password != self.confirm_password {
            errors.insert(PasswordField::Confirm, "Hasła nie są identyczne");
        }
        errors
    }

    pub fn to_dto(&self) -> ChangePasswordDto {
        ChangePasswordDto {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        }
    }
}

pub fn delete_confirmed(input: &str) -> bool {
    input == ACCOUNT_DELETE_PHRASE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved() -> UserProfile {
        UserProfile {
            id: Some(1),
            username: "jan".into(),
            email: "jan@example.com".into(),
            first_name: "Jan".into(),
            last_name: "Nowak".into(),
        }
    }

    #[test]
    fn profile_accepts_camel_case() {
        let p: UserProfile =
            serde_json::from_str(r#"{"username": "a", "firstName": "Ola", "lastName": "Lis"}"#)
                .unwrap();
        assert_eq!(p.first_name, "Ola");
        assert_eq!(p.last_name, "Lis");
        assert_eq!(p.email, "");
    }

    #[test]
    fn profile_validation() {
        let mut form = ProfileForm::from_profile(&saved());
        assert!(form.validate().is_empty());

        form.username = "ab".into();
        form.email = "not-an-email".into();
        form.first_name = "  ".into();
        let errors = form.validate();
        assert!(errors.has(ProfileField::Username));
        assert!(errors.has(ProfileField::Email));
        assert!(errors.has(ProfileField::FirstName));
        assert!(!errors.has(ProfileField::LastName));
    }

    #[test]
    fn only_changed_fields_are_sent() {
        let mut form = ProfileForm::from_profile(&saved());
        assert!(form.changes_from(&saved()).is_empty());

        form.set(ProfileField::Email, "nowy@example.com".into());
        let dto = form.changes_from(&saved());
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json, serde_json::json!({"email": "nowy@example.com"}));
    }

    #[test]
    fn password_validation() {
        let mut form = ChangePasswordForm::default();
        assert_eq!(form.validate().len(), 3);

        form.current_password = "old".into();
        form.new_password = "12345".into();
        form.confirm_password = "12345".into();
        assert!(form.validate().has(PasswordField::New));

        form.new_password = "123456".into();
        assert!(form.validate().has(PasswordField::Confirm));

        form.confirm_password = "123456".into();
        assert!(form.validate().is_empty());
        let json = serde_json::to_value(form.to_dto()).unwrap();
        assert_eq!(json["current_password"], "old");
        assert_eq!(json["new_password"], "123456");
    }

    #[test]
    fn delete_phrase_is_exact() {
        assert!(delete_confirmed("USUŃ KONTO"));
        assert!(!delete_confirmed("usun konto"));
        assert!(!delete_confirmed("USUN KONTO"));
        assert!(!delete_confirmed("USUŃ KONTO "));
    }
}
