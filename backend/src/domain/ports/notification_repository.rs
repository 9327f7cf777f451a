//! Port for the per-user notification mailbox.

use async_trait::async_trait;

use crate::domain::{Notification, NotificationId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification repository adapters.
    pub enum NotificationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "notification repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Notifications addressed to `user_id`, newest first with ties broken by
    /// descending id.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Notification>, NotificationRepositoryError>;

    /// Mark one notification read. Returns `false` when the id is unknown.
    async fn mark_read(&self, id: &NotificationId) -> Result<bool, NotificationRepositoryError>;

    /// Mark the listed notifications read and return how many rows changed.
    async fn mark_all_read(
        &self,
        ids: &[NotificationId],
    ) -> Result<usize, NotificationRepositoryError>;
}
