//! `BookingMailer` adapter over lettre's async SMTP transport.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::EmailMessage;
use crate::domain::ports::{BookingMailer, BookingMailerError};

/// How the connection to the relay is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Implicit TLS, usually port 465.
    Tls,
    /// Plain connection upgraded with STARTTLS, usually port 587.
    StartTls,
    /// Unencrypted; only for local relays.
    Plain,
}

/// Relay settings.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub security: SmtpSecurity,
    pub username: Option<String>,
    pub password: Option<Zeroizing<String>>,
    /// Sender mailbox, e.g. `Barbershop <bookings@example.com>`.
    pub from: String,
    pub timeout: Duration,
}

/// Sends booking emails through one SMTP relay.
#[derive(Clone)]
pub struct SmtpBookingMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpBookingMailer {
    /// Build the transport. No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns [`BookingMailerError::Address`] for an unparsable sender and
    /// [`BookingMailerError::Transport`] when the relay host is rejected.
    pub fn new(config: &SmtpConfig) -> Result<Self, BookingMailerError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|err| BookingMailerError::address(format!("{}: {err}", config.from)))?;

        let builder = match config.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host),
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            }
            SmtpSecurity::Plain => Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(
                &config.host,
            )),
        }
        .map_err(|err| BookingMailerError::transport(err.to_string()))?;

        let mut builder = builder.port(config.port).timeout(Some(config.timeout));
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                password.as_str().to_owned(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

/// Assemble a plain-text message from `from` to the message's contact.
pub(crate) fn build_message(
    from: &Mailbox,
    message: &EmailMessage,
) -> Result<Message, BookingMailerError> {
    let address = message
        .to
        .email
        .parse::<Address>()
        .map_err(|err| BookingMailerError::address(format!("{}: {err}", message.to.email)))?;
    Message::builder()
        .from(from.clone())
        .to(Mailbox::new(Some(message.to.name.clone()), address))
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|err| BookingMailerError::build(err.to_string()))
}

#[async_trait]
impl BookingMailer for SmtpBookingMailer {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), BookingMailerError> {
        let email = build_message(&self.from, message)?;
        let response = self
            .transport
            .send(email)
            .await
            .map_err(|err| BookingMailerError::transport(err.to_string()))?;
        debug!(code = %response.code(), "smtp relay accepted message");
        Ok(())
    }
}
