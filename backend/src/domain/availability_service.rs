//! Availability domain service backing the schedule read endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::ports::{AvailabilityQuery, ScheduleRepository, ScheduleRepositoryError};
use crate::domain::{Error, Slot, UserId};

pub(crate) fn map_schedule_error(error: ScheduleRepositoryError) -> Error {
    match error {
        ScheduleRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("schedule repository unavailable: {message}"))
        }
        ScheduleRepositoryError::Query { message } => {
            Error::internal(format!("schedule repository error: {message}"))
        }
    }
}

/// Schedule reads for one barber at a time.
#[derive(Clone)]
pub struct AvailabilityService<R> {
    schedule_repo: Arc<R>,
}

impl<R> AvailabilityService<R> {
    /// Create the service over a schedule repository.
    pub fn new(schedule_repo: Arc<R>) -> Self {
        Self { schedule_repo }
    }
}

#[async_trait]
impl<R> AvailabilityQuery for AvailabilityService<R>
where
    R: ScheduleRepository,
{
    async fn available_dates(&self, barber_id: UserId) -> Result<Vec<NaiveDate>, Error> {
        self.schedule_repo
            .list_available_dates(&barber_id)
            .await
            .map_err(map_schedule_error)
    }

    async fn available_slots(
        &self,
        barber_id: UserId,
        day: NaiveDate,
    ) -> Result<Vec<Slot>, Error> {
        let slots = self
            .schedule_repo
            .list_available_slots(&barber_id, day)
            .await
            .map_err(map_schedule_error)?;
        // Adapters filter by status; re-check so a stale row never leaks.
        Ok(slots.into_iter().filter(Slot::is_available).collect())
    }
}
