//! Port for reading barber schedule slots.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Slot, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by schedule repository adapters.
    pub enum ScheduleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "schedule repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "schedule repository query failed: {message}",
    }
}

/// Read access to the `schedule` table.
///
/// Unknown barbers are not an error; every method answers with an empty list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Distinct days holding at least one available slot, ascending.
    async fn list_available_dates(
        &self,
        barber_id: &UserId,
    ) -> Result<Vec<NaiveDate>, ScheduleRepositoryError>;

    /// Available slots on `day`, ordered by start time.
    async fn list_available_slots(
        &self,
        barber_id: &UserId,
        day: NaiveDate,
    ) -> Result<Vec<Slot>, ScheduleRepositoryError>;

    /// Every slot of the barber whatever its status, ordered by day then start.
    async fn list_barber_slots(
        &self,
        barber_id: &UserId,
    ) -> Result<Vec<Slot>, ScheduleRepositoryError>;
}
