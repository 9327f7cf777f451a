//! Booking engine.
//!
//! Commits a booking through [`BookingRepository`] and then runs the email
//! step. The email step is bounded by a timeout and never unwinds the commit:
//! a delivery failure is reported as `DependencyFailed` carrying the
//! committed appointment id.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    BookingCommand, BookingMailer, BookingMailerError, BookingRepository, BookingRepositoryError,
};
use crate::domain::{
    BookingConfirmation, BookingPlan, BookingRecord, BookingRequest, EmailDelivery, Error,
};

/// Default bound on the post-commit email step.
pub const DEFAULT_MAIL_TIMEOUT: Duration = Duration::from_secs(5);

fn map_booking_error(error: BookingRepositoryError) -> Error {
    match error {
        err @ (BookingRepositoryError::BarberNotFound { .. }
        | BookingRepositoryError::ServiceNotFound { .. }
        | BookingRepositoryError::CustomerNotFound { .. }
        | BookingRepositoryError::SlotNotFound { .. }) => Error::not_found(err.to_string()),
        err @ BookingRepositoryError::SlotUnavailable { .. } => Error::conflict(err.to_string()),
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
    }
}

#[derive(Debug)]
enum MailFailure {
    TimedOut(Duration),
    Rejected(BookingMailerError),
}

impl std::fmt::Display for MailFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimedOut(limit) => write!(f, "timed out after {}ms", limit.as_millis()),
            Self::Rejected(err) => write!(f, "{err}"),
        }
    }
}

/// Booking service implementing [`BookingCommand`].
pub struct BookingService<B, M: ?Sized> {
    booking_repo: Arc<B>,
    mailer: Arc<M>,
    clock: Arc<dyn Clock>,
    mail_timeout: Duration,
}

impl<B, M: ?Sized> BookingService<B, M> {
    /// Create the service with the default mail timeout.
    pub fn new(booking_repo: Arc<B>, mailer: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            booking_repo,
            mailer,
            clock,
            mail_timeout: DEFAULT_MAIL_TIMEOUT,
        }
    }

    /// Override the bound on the email step.
    #[must_use]
    pub fn with_mail_timeout(mut self, mail_timeout: Duration) -> Self {
        self.mail_timeout = mail_timeout;
        self
    }
}

impl<B, M> BookingService<B, M>
where
    M: BookingMailer + ?Sized,
{
    async fn send_emails(&self, record: &BookingRecord) -> Result<(), MailFailure> {
        let confirmation = record.confirmation_email();
        let heads_up = record.barber_email();
        let both = join(self.mailer.send(&confirmation), self.mailer.send(&heads_up));
        match tokio::time::timeout(self.mail_timeout, both).await {
            Err(_) => Err(MailFailure::TimedOut(self.mail_timeout)),
            Ok((first, second)) => first.and(second).map_err(MailFailure::Rejected),
        }
    }
}

#[async_trait]
impl<B, M> BookingCommand for BookingService<B, M>
where
    B: BookingRepository,
    M: BookingMailer + ?Sized,
{
    async fn create_booking(&self, request: BookingRequest) -> Result<BookingConfirmation, Error> {
        let plan = BookingPlan {
            request,
            booked_at: self.clock.utc().naive_utc(),
        };
        let record = self
            .booking_repo
            .commit_booking(&plan)
            .await
            .map_err(|err| {
                warn!(slot = %plan.request.slot, error = %err, "booking rejected");
                map_booking_error(err)
            })?;

        let appointment_id = record.appointment.id;
        info!(
            appointment_id = appointment_id.get(),
            barber_id = record.appointment.barber_id.get(),
            slot_id = record.appointment.slot_id.get(),
            "booking committed"
        );

        if !self.mailer.is_enabled() {
            return Ok(BookingConfirmation {
                appointment: record.appointment,
                email: EmailDelivery::Disabled,
            });
        }

        match self.send_emails(&record).await {
            Ok(()) => Ok(BookingConfirmation {
                appointment: record.appointment,
                email: EmailDelivery::Sent,
            }),
            Err(failure) => {
                warn!(
                    appointment_id = appointment_id.get(),
                    error = %failure,
                    "booking email failed after commit"
                );
                Err(Error::dependency_failed(format!(
                    "booking {appointment_id} is confirmed but email delivery failed: {failure}"
                ))
                .with_details(json!({ "appointmentId": appointment_id.get() })))
            }
        }
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
