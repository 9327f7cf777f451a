//! Port for appointment read views.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Appointment, AppointmentId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by appointment repository adapters.
    pub enum AppointmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "appointment repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "appointment repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// All appointments of the barber ordered by start.
    async fn list_for_barber(
        &self,
        barber_id: &UserId,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError>;

    /// Appointments starting on any day in `first..=last`, ordered by start.
    async fn list_for_barber_between(
        &self,
        barber_id: &UserId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError>;
}
