//! Appointments and the party that booked them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use super::auth::is_plausible_email;
use super::user::{MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PHONE_LEN};
use super::{AppointmentId, Contact, ServiceId, SlotId, UserId};

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown appointment status: {0}")]
pub struct ParseAppointmentStatusError(pub String);

impl FromStr for AppointmentStatus {
    type Err = ParseAppointmentStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ParseAppointmentStatusError(s.to_owned())),
        }
    }
}

/// Validation failure for inline guest details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuestContactError {
    #[error("guest {field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("guest {field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("guest email must be a valid address")]
    InvalidEmail,
}

impl GuestContactError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field } | Self::TooLong { field, .. } => field,
            Self::InvalidEmail => "email",
        }
    }
}

/// Contact details supplied by someone booking without an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestContact {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
}

fn non_blank(value: &str, field: &'static str, max: usize) -> Result<String, GuestContactError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GuestContactError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(GuestContactError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

impl GuestContact {
    pub fn try_new(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, GuestContactError> {
        let email = non_blank(email, "email", MAX_EMAIL_LEN)?;
        if !is_plausible_email(&email) {
            return Err(GuestContactError::InvalidEmail);
        }
        Ok(Self {
            first_name: non_blank(first_name, "firstName", MAX_NAME_LEN)?,
            last_name: non_blank(last_name, "lastName", MAX_NAME_LEN)?,
            email,
            phone: non_blank(phone, "phoneNumber", MAX_PHONE_LEN)?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn contact(&self) -> Contact {
        Contact {
            name: format!("{} {}", self.first_name, self.last_name),
            email: self.email.clone(),
        }
    }
}

/// Who an appointment is for. Exactly one mode applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingParty {
    Customer(UserId),
    Guest(GuestContact),
}

impl BookingParty {
    pub fn customer_id(&self) -> Option<UserId> {
        match self {
            Self::Customer(id) => Some(*id),
            Self::Guest(_) => None,
        }
    }

    pub fn guest(&self) -> Option<&GuestContact> {
        match self {
            Self::Customer(_) => None,
            Self::Guest(contact) => Some(contact),
        }
    }
}

/// Persisted appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub party: BookingParty,
    pub barber_id: UserId,
    pub service_id: ServiceId,
    pub slot_id: SlotId,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub status: AppointmentStatus,
}
