//! Account service: login, self-service registration, and profile edits.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::auth::is_plausible_email;
use crate::domain::ports::{
    PasswordHashError, PasswordHasher, UserAccounts, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, NewUser, ProfileChanges,
    Registration, Role, User,
};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => {
            Error::conflict(format!("{field} is already registered"))
                .with_details(json!({ "field": field, "code": "duplicate" }))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

fn invalid_field(field: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": "invalid" }))
}

fn normalise_field(
    value: Option<String>,
    field: &str,
    max: usize,
) -> Result<Option<String>, Error> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(invalid_field(field, format!("{field} must not be empty")));
            }
            if trimmed.chars().count() > max {
                return Err(invalid_field(
                    field,
                    format!("{field} must be at most {max} characters"),
                ));
            }
            Ok(Some(trimmed.to_owned()))
        }
    }
}

/// Trim supplied fields and reject blanks, over-long values, or malformed
/// email addresses.
fn normalise_changes(changes: ProfileChanges) -> Result<ProfileChanges, Error> {
    if changes.is_empty() {
        return Err(Error::invalid_request("no profile fields supplied"));
    }
    let email = normalise_field(changes.email, "email", MAX_EMAIL_LEN)?;
    if email.as_deref().is_some_and(|value| !is_plausible_email(value)) {
        return Err(invalid_field("email", "email must be a valid address"));
    }
    Ok(ProfileChanges {
        first_name: normalise_field(changes.first_name, "firstName", MAX_NAME_LEN)?,
        last_name: normalise_field(changes.last_name, "lastName", MAX_NAME_LEN)?,
        email,
        phone: normalise_field(changes.phone, "phoneNumber", MAX_PHONE_LEN)?,
    })
}

/// Login, registration and profile edits over the user repository.
#[derive(Clone)]
pub struct UserAccountService<U, H> {
    user_repo: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserAccountService<U, H> {
    /// Create the service with a user repository and password hasher.
    pub fn new(user_repo: Arc<U>, hasher: Arc<H>) -> Self {
        Self { user_repo, hasher }
    }
}

#[async_trait]
impl<U, H> UserAccounts for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .user_repo
            .find_credentials(credentials.username())
            .await
            .map_err(map_repository_error)?;
        let Some(stored) = stored else {
            return Err(Error::unauthorized("invalid credentials"));
        };
        let verified = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .map_err(|err| {
                warn!(user_id = stored.user.id.get(), error = %err, "stored hash rejected");
                map_hash_error(err)
            })?;
        if !verified {
            return Err(Error::unauthorized("invalid credentials"));
        }
        Ok(stored.user)
    }

    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password.as_str())
            .map_err(map_hash_error)?;
        let new_user = NewUser {
            username: registration.username,
            password_hash,
            first_name: registration.first_name,
            last_name: registration.last_name,
            role: Role::Customer,
            email: registration.email,
            phone: registration.phone,
        };
        let user = self
            .user_repo
            .create(&new_user)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = user.id.get(), "customer registered");
        Ok(user)
    }

    async fn update_profile(
        &self,
        username: &str,
        changes: ProfileChanges,
    ) -> Result<User, Error> {
        let changes = normalise_changes(changes)?;
        self.user_repo
            .update_profile(username, &changes)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {username} not found")))
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;
