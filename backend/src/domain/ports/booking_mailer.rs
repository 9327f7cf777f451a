//! Port for sending booking emails.

use async_trait::async_trait;

use crate::domain::EmailMessage;

use super::define_port_error;

define_port_error! {
    /// Failures raised while handing a message to the mail transport.
    pub enum BookingMailerError {
        /// Sender or recipient address could not be parsed.
        Address { message: String } => "invalid email address: {message}",
        /// The message could not be assembled.
        Build { message: String } => "email could not be built: {message}",
        /// The transport refused or failed to deliver the message.
        Transport { message: String } => "email transport failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingMailer: Send + Sync {
    /// Whether messages are delivered at all.
    fn is_enabled(&self) -> bool;

    async fn send(&self, message: &EmailMessage) -> Result<(), BookingMailerError>;
}

/// Mailer used when no SMTP relay is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledBookingMailer;

#[async_trait]
impl BookingMailer for DisabledBookingMailer {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn send(&self, _message: &EmailMessage) -> Result<(), BookingMailerError> {
        Ok(())
    }
}
