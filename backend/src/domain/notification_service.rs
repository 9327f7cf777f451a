//! Notification mailbox service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    NotificationInbox, NotificationRepository, NotificationRepositoryError,
};
use crate::domain::{Error, Notification, NotificationId, UserId};

fn map_repository_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => Error::service_unavailable(
            format!("notification repository unavailable: {message}"),
        ),
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

/// Notification inbox implementing [`NotificationInbox`].
#[derive(Clone)]
pub struct NotificationService<R> {
    notification_repo: Arc<R>,
}

impl<R> NotificationService<R> {
    /// Create the service over a notification repository.
    pub fn new(notification_repo: Arc<R>) -> Self {
        Self { notification_repo }
    }
}

#[async_trait]
impl<R> NotificationInbox for NotificationService<R>
where
    R: NotificationRepository,
{
    async fn list(&self, user_id: UserId) -> Result<Vec<Notification>, Error> {
        self.notification_repo
            .list_for_user(&user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn mark_read(&self, id: NotificationId) -> Result<(), Error> {
        let found = self
            .notification_repo
            .mark_read(&id)
            .await
            .map_err(map_repository_error)?;
        if found {
            Ok(())
        } else {
            Err(Error::not_found(format!("notification {id} not found")))
        }
    }

    async fn mark_all_read(&self, mut ids: Vec<NotificationId>) -> Result<usize, Error> {
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(0);
        }
        let changed = self
            .notification_repo
            .mark_all_read(&ids)
            .await
            .map_err(map_repository_error)?;
        debug!(requested = ids.len(), changed, "bulk notification read");
        Ok(changed)
    }
}
