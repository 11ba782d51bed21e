//! Core domain for the onduty login form: form model, validation,
//! authentication capability, navigation hooks, configuration, logging.

pub mod auth;
pub mod config;
pub mod form;
pub mod logging;
pub mod navigation;
pub mod status;

pub use auth::{Account, AllowListAuthenticator, Authenticator, Credentials, LoginError};
pub use config::Config;
pub use form::{Field, FieldErrors, FormInput, LoginMode, validate, validate_input};
pub use navigation::{LogNavigator, LoginListener, Navigator, Route};
pub use status::{StatusKind, StatusMessage};
