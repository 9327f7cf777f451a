//! PostgreSQL-backed `NotificationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::{Notification, NotificationId, NotificationStatus, UserId};

use super::diesel_error_mapping::{collect_rows, map_diesel_error, map_pool_error};
use super::models::NotificationRow;
use super::pool::{DbPool, PoolError};
use super::schema::notifications;

/// Diesel-backed notification mailbox.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> NotificationRepositoryError {
    map_pool_error(error, NotificationRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> NotificationRepositoryError {
    map_diesel_error(
        error,
        NotificationRepositoryError::query,
        NotificationRepositoryError::connection,
    )
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<NotificationRow> = notifications::table
            .filter(notifications::user_id.eq(user_id.get()))
            .select(NotificationRow::as_select())
            .order_by((notifications::created_at.desc(), notifications::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        collect_rows(
            rows,
            NotificationRow::into_domain,
            NotificationRepositoryError::query,
        )
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<bool, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        // Matching already-read rows keeps the call idempotent.
        let matched = diesel::update(notifications::table.find(id.get()))
            .set(notifications::status.eq(NotificationStatus::Read.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(matched > 0)
    }

    async fn mark_all_read(
        &self,
        ids: &[NotificationId],
    ) -> Result<usize, NotificationRepositoryError> {
        let raw: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        diesel::update(
            notifications::table
                .filter(notifications::id.eq_any(raw))
                .filter(notifications::status.eq(NotificationStatus::Unread.as_str())),
        )
        .set(notifications::status.eq(NotificationStatus::Read.as_str()))
        .execute(&mut conn)
        .await
        .map_err(map_diesel)
    }
}
