//! Authentication primitives: login credentials and registration input.
//!
//! Constructors validate raw strings so handlers can reject malformed payloads
//! before a service or port is involved. Passwords are held in
//! [`Zeroizing`] buffers and wiped on drop.

use zeroize::Zeroizing;

use super::user::{MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PHONE_LEN};

/// Longest username the directory accepts.
pub const MAX_USERNAME_LEN: usize = 32;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller whitespace.
///
/// # Examples
/// ```
/// use barbershop::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" bob ", "hunter2").unwrap();
/// assert_eq!(creds.username(), "bob");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Field-level failures for account registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("email must be a valid address")]
    InvalidEmail,
}

impl RegistrationValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field } | Self::TooLong { field, .. } => field,
            Self::InvalidEmail => "email",
        }
    }
}

/// Raw registration payload handed to [`Registration::try_new`].
#[derive(Debug, Clone, Default)]
pub struct RegistrationDraft<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

/// Validated self-service registration for a customer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub password: Zeroizing<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

fn required(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, RegistrationValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(RegistrationValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// Minimal address shape check: one `@` with text on both sides.
pub fn is_plausible_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

impl Registration {
    /// Validate a registration payload.
    pub fn try_new(draft: RegistrationDraft<'_>) -> Result<Self, RegistrationValidationError> {
        let username = required(draft.username, "username", MAX_USERNAME_LEN)?;
        if draft.password.is_empty() {
            return Err(RegistrationValidationError::EmptyField { field: "password" });
        }
        let email = required(draft.email, "email", MAX_EMAIL_LEN)?;
        if !is_plausible_email(&email) {
            return Err(RegistrationValidationError::InvalidEmail);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(draft.password.to_owned()),
            first_name: required(draft.first_name, "firstName", MAX_NAME_LEN)?,
            last_name: required(draft.last_name, "lastName", MAX_NAME_LEN)?,
            email,
            phone: required(draft.phone, "phoneNumber", MAX_PHONE_LEN)?,
        })
    }
}
