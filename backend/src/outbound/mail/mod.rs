//! SMTP delivery of booking emails via `lettre`.

mod smtp_booking_mailer;

pub use smtp_booking_mailer::{SmtpBookingMailer, SmtpConfig, SmtpSecurity};
