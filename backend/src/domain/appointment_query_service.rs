//! Read-only appointment views for barbers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Weekday};
use mockable::Clock;

use crate::domain::ports::{
    AppointmentRepository, AppointmentRepositoryError, AppointmentsQuery,
};
use crate::domain::{Appointment, AppointmentId, Error, UserId};

fn map_repository_error(error: AppointmentRepositoryError) -> Error {
    match error {
        AppointmentRepositoryError::Connection { message } => Error::service_unavailable(
            format!("appointment repository unavailable: {message}"),
        ),
        AppointmentRepositoryError::Query { message } => {
            Error::internal(format!("appointment repository error: {message}"))
        }
    }
}

/// First and last day of the Monday-to-Sunday week containing `day`.
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let week = day.week(Weekday::Mon);
    let monday = week.first_day();
    let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
    (monday, sunday)
}

/// Appointment lookups and day or week views for a barber.
#[derive(Clone)]
pub struct AppointmentQueryService<R> {
    appointment_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> AppointmentQueryService<R> {
    /// Create the service over an appointment repository and clock.
    pub fn new(appointment_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            appointment_repo,
            clock,
        }
    }
}

#[async_trait]
impl<R> AppointmentsQuery for AppointmentQueryService<R>
where
    R: AppointmentRepository,
{
    async fn get_appointment(&self, id: AppointmentId) -> Result<Appointment, Error> {
        self.appointment_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("appointment {id} not found")))
    }

    async fn list_for_barber(&self, barber_id: UserId) -> Result<Vec<Appointment>, Error> {
        self.appointment_repo
            .list_for_barber(&barber_id)
            .await
            .map_err(map_repository_error)
    }

    async fn list_daily(
        &self,
        barber_id: UserId,
        day: NaiveDate,
    ) -> Result<Vec<Appointment>, Error> {
        self.appointment_repo
            .list_for_barber_between(&barber_id, day, day)
            .await
            .map_err(map_repository_error)
    }

    async fn list_weekly(
        &self,
        barber_id: UserId,
        week_of: Option<NaiveDate>,
    ) -> Result<Vec<Appointment>, Error> {
        let anchor = week_of.unwrap_or_else(|| self.clock.utc().date_naive());
        let (monday, sunday) = week_bounds(anchor);
        self.appointment_repo
            .list_for_barber_between(&barber_id, monday, sunday)
            .await
            .map_err(map_repository_error)
    }
}
