//! Driving port for reading and acknowledging notifications.

use async_trait::async_trait;

use crate::domain::{Error, Notification, NotificationId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// Mailbox contents, newest first.
    async fn list(&self, user_id: UserId) -> Result<Vec<Notification>, Error>;

    /// Mark one notification read. Marking twice succeeds; unknown ids are
    /// `NotFound`.
    async fn mark_read(&self, id: NotificationId) -> Result<(), Error>;

    /// Mark many notifications read, skipping unknown ids.
    ///
    /// Returns the number of notifications that changed.
    async fn mark_all_read(&self, ids: Vec<NotificationId>) -> Result<usize, Error>;
}
