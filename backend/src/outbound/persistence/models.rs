//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types report
//! malformed rows as plain strings so each repository can wrap them in its
//! own query error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::{
    Appointment, AppointmentId, AppointmentStatus, BookingParty, GuestContact, Notification,
    NotificationId, Role, Service, ServiceDuration, ServiceId, Slot, SlotId, TimeRange, User,
    UserCredentials, UserId,
};

use super::schema::{appointments, barber_services, notifications, schedule, services, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Public user columns; the credential hash is selected separately.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let role = self.role.parse::<Role>().map_err(|err| err.to_string())?;
        Ok(User {
            id: UserId::new(self.id),
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            email: self.email,
            phone: self.phone,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialsRow {
    #[diesel(embed)]
    pub user: UserRow,
    pub password_hash: String,
}

impl CredentialsRow {
    pub(crate) fn into_domain(self) -> Result<UserCredentials, String> {
        Ok(UserCredentials {
            user: self.user.into_domain()?,
            password_hash: self.password_hash,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

/// `None` fields are left untouched by Diesel.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct ProfileUpdate<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ServiceRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub duration_minutes: i32,
}

impl ServiceRow {
    pub(crate) fn into_domain(self) -> Result<Service, String> {
        let minutes = u32::try_from(self.duration_minutes)
            .map_err(|_| format!("negative duration for service {}", self.id))?;
        let duration = ServiceDuration::from_minutes(minutes).map_err(|err| err.to_string())?;
        Ok(Service {
            id: ServiceId::new(self.id),
            name: self.name,
            description: self.description,
            price: self.price,
            duration,
        })
    }
}

/// Convert a domain duration to the stored column value.
pub(crate) fn duration_column(duration: ServiceDuration) -> i32 {
    // Bounded by `MAX_SERVICE_MINUTES`.
    i32::try_from(duration.minutes()).unwrap_or(i32::MAX)
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = services)]
pub(crate) struct NewServiceRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: Decimal,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = services)]
pub(crate) struct ServiceUpdate<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = barber_services)]
pub(crate) struct NewBarberServiceRow {
    pub barber_id: i32,
    pub service_id: i32,
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schedule)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SlotRow {
    pub id: i32,
    pub barber_id: i32,
    pub day: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
}

impl SlotRow {
    pub(crate) fn into_domain(self) -> Result<Slot, String> {
        let range =
            TimeRange::new(self.start_time, self.end_time).map_err(|err| err.to_string())?;
        let status = self.status.parse().map_err(|err: crate::domain::ParseSlotStatusError| {
            err.to_string()
        })?;
        Ok(Slot {
            id: SlotId::new(self.id),
            barber_id: UserId::new(self.barber_id),
            day: self.day,
            range,
            status,
        })
    }
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AppointmentRow {
    pub id: i32,
    pub customer_id: Option<i32>,
    pub guest_first_name: Option<String>,
    pub guest_last_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub barber_id: i32,
    pub service_id: i32,
    pub schedule_id: i32,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub status: String,
}

impl AppointmentRow {
    fn party(&self) -> Result<BookingParty, String> {
        if let Some(customer_id) = self.customer_id {
            return Ok(BookingParty::Customer(UserId::new(customer_id)));
        }
        match (
            self.guest_first_name.as_deref(),
            self.guest_last_name.as_deref(),
            self.guest_email.as_deref(),
            self.guest_phone.as_deref(),
        ) {
            (Some(first), Some(last), Some(email), Some(phone)) => {
                GuestContact::try_new(first, last, email, phone)
                    .map(BookingParty::Guest)
                    .map_err(|err| format!("appointment {}: {err}", self.id))
            }
            _ => Err(format!("appointment {} has no booking party", self.id)),
        }
    }

    pub(crate) fn into_domain(self) -> Result<Appointment, String> {
        let party = self.party()?;
        let status = self
            .status
            .parse::<AppointmentStatus>()
            .map_err(|err| err.to_string())?;
        Ok(Appointment {
            id: AppointmentId::new(self.id),
            party,
            barber_id: UserId::new(self.barber_id),
            service_id: ServiceId::new(self.service_id),
            slot_id: SlotId::new(self.schedule_id),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            status,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = appointments)]
pub(crate) struct NewAppointmentRow<'a> {
    pub customer_id: Option<i32>,
    pub guest_first_name: Option<&'a str>,
    pub guest_last_name: Option<&'a str>,
    pub guest_email: Option<&'a str>,
    pub guest_phone: Option<&'a str>,
    pub barber_id: i32,
    pub service_id: i32,
    pub schedule_id: i32,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: i32,
    pub user_id: i32,
    pub appointment_id: i32,
    pub message: String,
    pub kind: String,
    pub created_at: NaiveDateTime,
    pub status: String,
}

impl NotificationRow {
    pub(crate) fn into_domain(self) -> Result<Notification, String> {
        Ok(Notification {
            id: NotificationId::new(self.id),
            user_id: UserId::new(self.user_id),
            appointment_id: AppointmentId::new(self.appointment_id),
            message: self.message,
            kind: self.kind.parse().map_err(
                |err: crate::domain::ParseNotificationKindError| err.to_string(),
            )?,
            created_at: self.created_at,
            status: self.status.parse().map_err(
                |err: crate::domain::ParseNotificationStatusError| err.to_string(),
            )?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub user_id: i32,
    pub appointment_id: i32,
    pub message: &'a str,
    pub kind: &'a str,
    pub created_at: NaiveDateTime,
    pub status: &'a str,
}
