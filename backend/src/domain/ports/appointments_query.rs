//! Driving port for appointment read views.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Appointment, AppointmentId, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentsQuery: Send + Sync {
    async fn get_appointment(&self, id: AppointmentId) -> Result<Appointment, Error>;

    async fn list_for_barber(&self, barber_id: UserId) -> Result<Vec<Appointment>, Error>;

    async fn list_daily(&self, barber_id: UserId, day: NaiveDate)
    -> Result<Vec<Appointment>, Error>;

    /// Monday-to-Sunday week containing `week_of`, or the current week.
    async fn list_weekly(
        &self,
        barber_id: UserId,
        week_of: Option<NaiveDate>,
    ) -> Result<Vec<Appointment>, Error>;
}
