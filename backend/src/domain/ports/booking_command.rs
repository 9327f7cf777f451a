//! Driving port for creating bookings.

use async_trait::async_trait;

use crate::domain::{BookingConfirmation, BookingRequest, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Book the exact slot named by the request.
    ///
    /// On success the appointment is committed and the email step has run.
    /// When the email step fails after commit, the returned error carries
    /// `ErrorCode::DependencyFailed` and an `appointmentId` detail; the booking
    /// stands and must not be retried.
    async fn create_booking(&self, request: BookingRequest) -> Result<BookingConfirmation, Error>;
}
