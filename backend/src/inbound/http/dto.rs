//! Response bodies shared across handlers.
//!
//! Dates render as `YYYY-MM-DD`, times as `HH:MM`, and timestamps as
//! `YYYY-MM-DDTHH:MM:SS`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    Appointment, BarberAvailability, GuestContact, Notification, Service, Slot, User,
};

pub(crate) fn wire_date(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

pub(crate) fn wire_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub(crate) fn wire_timestamp(stamp: NaiveDateTime) -> String {
    stamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Public profile of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 2)]
    pub id: i32,
    #[schema(example = "bo")]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "barber")]
    pub role: String,
    pub email: String,
    pub phone_number: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role.as_str().to_owned(),
            email: user.email,
            phone_number: user.phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    pub id: i32,
    #[schema(example = "Haircut")]
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "25.00")]
    pub price: Decimal,
    #[schema(example = "30 min")]
    pub duration: String,
    #[schema(example = 30)]
    pub duration_minutes: u32,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id.get(),
            name: service.name,
            description: service.description,
            price: service.price,
            duration: service.duration.to_string(),
            duration_minutes: service.duration.minutes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
    pub id: i32,
    pub barber_id: i32,
    #[schema(example = "2024-06-01")]
    pub date: String,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "09:30")]
    pub end_time: String,
    #[schema(example = "available")]
    pub status: String,
}

impl From<Slot> for SlotResponse {
    fn from(slot: Slot) -> Self {
        Self {
            id: slot.id.get(),
            barber_id: slot.barber_id.get(),
            date: wire_date(slot.day),
            start_time: wire_time(slot.range.start()),
            end_time: wire_time(slot.range.end()),
            status: slot.status.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarberAvailabilityResponse {
    pub barber: UserResponse,
    pub slots: Vec<SlotResponse>,
}

impl From<BarberAvailability> for BarberAvailabilityResponse {
    fn from(value: BarberAvailability) -> Self {
        Self {
            barber: value.barber.into(),
            slots: value.slots.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

impl From<&GuestContact> for GuestResponse {
    fn from(guest: &GuestContact) -> Self {
        Self {
            first_name: guest.first_name().to_owned(),
            last_name: guest.last_name().to_owned(),
            email: guest.email().to_owned(),
            phone_number: guest.phone().to_owned(),
        }
    }
}

/// Appointment echo. Exactly one of `customerId` or `guest` is present.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: i32,
    pub barber_id: i32,
    pub service_id: i32,
    pub schedule_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<GuestResponse>,
    #[schema(example = "2024-06-01")]
    pub date: String,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "09:30")]
    pub end_time: String,
    #[schema(example = "2024-06-01T09:00:00")]
    pub starts_at: String,
    pub ends_at: String,
    #[schema(example = "confirmed")]
    pub status: String,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id.get(),
            barber_id: appointment.barber_id.get(),
            service_id: appointment.service_id.get(),
            schedule_id: appointment.slot_id.get(),
            customer_id: appointment.party.customer_id().map(|id| id.get()),
            guest: appointment.party.guest().map(GuestResponse::from),
            date: wire_date(appointment.starts_at.date()),
            start_time: wire_time(appointment.starts_at.time()),
            end_time: wire_time(appointment.ends_at.time()),
            starts_at: wire_timestamp(appointment.starts_at),
            ends_at: wire_timestamp(appointment.ends_at),
            status: appointment.status.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: i32,
    pub user_id: i32,
    pub appointment_id: i32,
    pub message: String,
    #[serde(rename = "type")]
    #[schema(example = "booking_created")]
    pub kind: String,
    #[schema(example = "2024-05-30T14:12:00")]
    pub created_at: String,
    #[schema(example = "unread")]
    pub status: String,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id.get(),
            user_id: notification.user_id.get(),
            appointment_id: notification.appointment_id.get(),
            message: notification.message,
            kind: notification.kind.as_str().to_owned(),
            created_at: wire_timestamp(notification.created_at),
            status: notification.status.as_str().to_owned(),
        }
    }
}
