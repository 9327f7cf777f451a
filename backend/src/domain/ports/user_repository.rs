//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, ProfileChanges, User, UserCredentials, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column already holds the submitted value.
        Duplicate { field: String } => "user {field} is already taken",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user and stored password hash by username.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Apply profile changes to the user named `username`.
    ///
    /// Returns `None` when no such user exists.
    async fn update_profile(
        &self,
        username: &str,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, UserPersistenceError>;
}
