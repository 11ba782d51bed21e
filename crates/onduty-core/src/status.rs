//! Status banner shown under the form.

use serde::Serialize;

pub const CORRECT_ERRORS_MESSAGE: &str = "Please correct the errors above.";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful! Redirecting...";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials for selected role.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Failure,
}

/// Tagged status message. The kind decides how the banner is styled,
/// never the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Failure,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == StatusKind::Success
    }
}
