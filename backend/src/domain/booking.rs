//! Booking requests, commit records, and the emails they produce.
//!
//! A [`BookingRequest`] names the exact slot tuple to consume. The booking
//! service stamps it into a [`BookingPlan`] and hands it to the repository,
//! which commits appointment, slot flip, and barber notification together and
//! answers with a [`BookingRecord`]. Emails are composed from that record
//! after commit.

use chrono::NaiveDateTime;

use super::{Appointment, BookingParty, Contact, ServiceId, SlotKey};

/// Column width of `notifications.message`.
pub const MAX_NOTIFICATION_MESSAGE_LEN: usize = 255;

/// Validated request to book one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub slot: SlotKey,
    pub service_id: ServiceId,
    pub party: BookingParty,
}

/// Request plus the instant the booking was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPlan {
    pub request: BookingRequest,
    pub booked_at: NaiveDateTime,
}

/// What the repository committed, with the contacts needed for emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub appointment: Appointment,
    pub slot: SlotKey,
    pub barber: Contact,
    pub recipient: Contact,
    pub service_name: String,
}

/// Outcome of the post-commit email step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailDelivery {
    Sent,
    /// No mail transport is configured.
    Disabled,
}

/// Successful booking returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub appointment: Appointment,
    pub email: EmailDelivery,
}

/// Plain-text email addressed to one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: Contact,
    pub subject: String,
    pub body: String,
}

fn when(key: &SlotKey) -> String {
    format!(
        "{} from {} to {}",
        key.day.format("%Y-%m-%d"),
        key.range.start().format("%H:%M"),
        key.range.end().format("%H:%M"),
    )
}

/// Text of the barber's in-app notification.
///
/// Truncated on a character boundary to fit the stored column.
pub fn booking_notification_message(
    customer_name: &str,
    service_name: &str,
    key: &SlotKey,
) -> String {
    let message = format!(
        "New booking: {customer_name} booked {service_name} on {}",
        when(key)
    );
    match message.char_indices().nth(MAX_NOTIFICATION_MESSAGE_LEN) {
        Some((cut, _)) => message[..cut].to_owned(),
        None => message,
    }
}

impl BookingRecord {
    /// Confirmation sent to the customer or guest.
    pub fn confirmation_email(&self) -> EmailMessage {
        EmailMessage {
            to: self.recipient.clone(),
            subject: "Your appointment is confirmed".to_owned(),
            body: format!(
                "Hello {},\n\nYour appointment for {} with {} on {} is confirmed.\n",
                self.recipient.name,
                self.service_name,
                self.barber.name,
                when(&self.slot),
            ),
        }
    }

    /// Heads-up sent to the barber.
    pub fn barber_email(&self) -> EmailMessage {
        EmailMessage {
            to: self.barber.clone(),
            subject: "New appointment booked".to_owned(),
            body: format!(
                "Hello {},\n\n{} booked {} on {}.\n",
                self.barber.name,
                self.recipient.name,
                self.service_name,
                when(&self.slot),
            ),
        }
    }
}
