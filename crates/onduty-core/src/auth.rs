//! Authentication capability.
//!
//! The submission controller never compares credentials itself; it calls an
//! `Authenticator`. The default implementation is a fixed allow list of
//! `(role, email, password)` accounts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::form::{FieldErrors, FormInput, LoginMode};

/// Credentials captured from the form at submit time.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn from_input(input: &FormInput) -> Self {
        Self::new(input.email.clone(), input.password.clone())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Errors surfaced by a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// One or more fields failed validation.
    Validation(FieldErrors),
    /// No account matched the credentials for the selected role.
    CredentialMismatch,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::Validation(errors) => {
                write!(f, "{} field(s) failed validation", errors.len())
            }
            LoginError::CredentialMismatch => write!(f, "Invalid credentials for selected role"),
        }
    }
}

impl std::error::Error for LoginError {}

/// Checks credentials for a role.
///
/// Returns the granted role on success.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: &Credentials, mode: LoginMode)
    -> Result<LoginMode, LoginError>;
}

/// An allow-listed account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub role: LoginMode,
    pub email: String,
    pub password: String,
}

impl Account {
    pub fn new(role: LoginMode, email: &str, password: &str) -> Self {
        Self {
            role,
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    /// The two built-in demo accounts.
    pub fn defaults() -> Vec<Account> {
        vec![
            Account::new(LoginMode::Employee, "employee@domain.com", "employee123"),
            Account::new(LoginMode::Admin, "admin@domain.com", "admin123"),
        ]
    }

    fn matches(&self, credentials: &Credentials, mode: LoginMode) -> bool {
        self.role == mode
            && self.email == credentials.email
            && self.password == credentials.password
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Exact-match authenticator over a fixed account list.
///
/// The role must match as well: admin credentials submitted in employee
/// mode are rejected.
#[derive(Debug, Clone)]
pub struct AllowListAuthenticator {
    accounts: Vec<Account>,
}

impl AllowListAuthenticator {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }
}

impl Default for AllowListAuthenticator {
    fn default() -> Self {
        Self::new(Account::defaults())
    }
}

impl Authenticator for AllowListAuthenticator {
    fn authenticate(
        &self,
        credentials: &Credentials,
        mode: LoginMode,
    ) -> Result<LoginMode, LoginError> {
        if self
            .accounts
            .iter()
            .any(|account| account.matches(credentials, mode))
        {
            tracing::debug!(email = %credentials.email, %mode, "credentials accepted");
            Ok(mode)
        } else {
            tracing::debug!(email = %credentials.email, %mode, "credentials rejected");
            Err(LoginError::CredentialMismatch)
        }
    }
}
