//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Unique constraints on username, email, and phone are reported as
//! [`UserPersistenceError::Duplicate`] naming the clashing field.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, ProfileChanges, User, UserCredentials, UserId};

use super::diesel_error_mapping::{
    Violation, map_diesel_error, map_pool_error, violated_constraint,
};
use super::models::{CredentialsRow, NewUserRow, ProfileUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed user directory.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

/// Wire name of the field guarded by a `users` unique constraint.
fn duplicate_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        "users_username_key" => Some("username"),
        "users_email_key" => Some("email"),
        "users_phone_key" => Some("phoneNumber"),
        _ => None,
    }
}

fn map_diesel(error: diesel::result::Error) -> UserPersistenceError {
    let duplicate = match violated_constraint(&error) {
        Some((Violation::Unique, constraint)) => duplicate_field(constraint),
        _ => None,
    };
    if let Some(field) = duplicate {
        return UserPersistenceError::duplicate(field);
    }
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn into_user(row: UserRow) -> Result<User, UserPersistenceError> {
    row.into_domain().map_err(UserPersistenceError::query)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<CredentialsRow> = users::table
            .filter(users::username.eq(username))
            .select(CredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        row.map(|row| row.into_domain().map_err(UserPersistenceError::query))
            .transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        row.map(into_user).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: UserRow = diesel::insert_into(users::table)
            .values(&NewUserRow {
                username: &user.username,
                password_hash: &user.password_hash,
                first_name: &user.first_name,
                last_name: &user.last_name,
                role: user.role.as_str(),
                email: &user.email,
                phone: &user.phone,
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;
        into_user(row)
    }

    async fn update_profile(
        &self,
        username: &str,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let update = ProfileUpdate {
            first_name: changes.first_name.as_deref(),
            last_name: changes.last_name.as_deref(),
            email: changes.email.as_deref(),
            phone: changes.phone.as_deref(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<UserRow> = diesel::update(users::table.filter(users::username.eq(username)))
            .set(&update)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        row.map(into_user).transpose()
    }
}
