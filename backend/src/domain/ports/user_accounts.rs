//! Driving port for account login, registration, and profile edits.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, ProfileChanges, Registration, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Verify credentials. Any mismatch is `Unauthorized`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Create a customer account.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Update the named user's profile.
    async fn update_profile(&self, username: &str, changes: ProfileChanges)
    -> Result<User, Error>;
}
