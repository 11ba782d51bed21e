//! Login form model and validator.
//!
//! `FormInput` is the value the form state holder owns; it is replaced
//! wholesale on every change. `validate` is the pure rule set applied both
//! on the debounce timer and synchronously before a submission.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const EMPTY_PASSWORD_MESSAGE: &str = "Password cannot be empty";

/// Role the user is signing in as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoginMode {
    #[default]
    Employee,
    Admin,
}

impl LoginMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LoginMode::Employee => "employee",
            LoginMode::Admin => "admin",
        }
    }

    /// Label shown on the role toggle.
    pub fn display_name(self) -> &'static str {
        match self {
            LoginMode::Employee => "Employee",
            LoginMode::Admin => "Admin",
        }
    }

    /// The other mode of the pair.
    pub fn other(self) -> Self {
        match self {
            LoginMode::Employee => LoginMode::Admin,
            LoginMode::Admin => LoginMode::Employee,
        }
    }

    pub fn all() -> &'static [LoginMode] {
        &[LoginMode::Employee, LoginMode::Admin]
    }
}

impl fmt::Display for LoginMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoginMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employee" => Ok(LoginMode::Employee),
            "admin" => Ok(LoginMode::Admin),
            other => anyhow::bail!("Unknown login mode '{other}' (expected employee or admin)"),
        }
    }
}

/// Validated text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Email,
    Password,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Email => "Email Address",
            Field::Password => "Password",
        }
    }
}

/// Current values of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
    pub login_mode: LoginMode,
}

impl FormInput {
    pub fn new(login_mode: LoginMode) -> Self {
        Self {
            login_mode,
            ..Self::default()
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    /// Returns a copy with `field` set to `value`.
    #[must_use]
    pub fn with_value(&self, field: Field, value: String) -> Self {
        match field {
            Field::Email => Self {
                email: value,
                ..self.clone()
            },
            Field::Password => Self {
                password: value,
                ..self.clone()
            },
        }
    }

    #[must_use]
    pub fn with_mode(&self, login_mode: LoginMode) -> Self {
        Self {
            login_mode,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_remember_me(&self, remember_me: bool) -> Self {
        Self {
            remember_me,
            ..self.clone()
        }
    }

    /// True when at least one text field has content (gates live validation).
    pub fn has_text(&self) -> bool {
        !self.email.is_empty() || !self.password.is_empty()
    }
}

/// Per-field validation messages. Empty means nothing to show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

/// Validates the email and password fields.
///
/// The email rule is intentionally permissive: any string containing both
/// `@` and `.` passes.
pub fn validate(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if !email.contains('@') || !email.contains('.') {
        errors.insert(Field::Email, INVALID_EMAIL_MESSAGE);
    }
    if password.is_empty() {
        errors.insert(Field::Password, EMPTY_PASSWORD_MESSAGE);
    }
    errors
}

/// Validates a full form input.
pub fn validate_input(input: &FormInput) -> FieldErrors {
    validate(&input.email, &input.password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_without_at_or_dot_is_rejected() {
        for email in ["", "plain", "user@domain", "user.domain.com", "   "] {
            let errors = validate(email, "secret");
            assert_eq!(
                errors.get(Field::Email),
                Some(INVALID_EMAIL_MESSAGE),
                "expected error for {email:?}"
            );
            assert_eq!(errors.get(Field::Password), None);
        }
    }

    #[test]
    fn test_email_rule_is_permissive() {
        for email in ["a@b.c", ".@", "@.", "employee@domain.com", "x.y@z"] {
            let errors = validate(email, "");
            assert_eq!(errors.get(Field::Email), None, "unexpected error for {email:?}");
        }
    }

    #[test]
    fn test_password_only_needs_to_be_non_empty() {
        assert_eq!(
            validate("a@b.c", "").get(Field::Password),
            Some(EMPTY_PASSWORD_MESSAGE)
        );
        assert!(validate("a@b.c", " ").is_empty());
    }

    #[test]
    fn test_validate_is_deterministic() {
        let first = validate("nope", "");
        let second = validate("nope", "");
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_with_value_replaces_only_one_field() {
        let input = FormInput::new(LoginMode::Admin).with_value(Field::Email, "a@b.c".into());
        let input = input.with_value(Field::Password, "pw".into());
        assert_eq!(input.email, "a@b.c");
        assert_eq!(input.password, "pw");
        assert_eq!(input.login_mode, LoginMode::Admin);
        assert!(input.has_text());
    }

    #[test]
    fn test_login_mode_parses_case_insensitively() {
        assert_eq!("Admin".parse::<LoginMode>().unwrap(), LoginMode::Admin);
        assert_eq!(" employee ".parse::<LoginMode>().unwrap(), LoginMode::Employee);
        assert!("manager".parse::<LoginMode>().is_err());
    }
}
