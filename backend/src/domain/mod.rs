//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define the strongly typed booking model used by the HTTP and
//! persistence adapters, plus the services implementing the driving ports.
//! Types are transport agnostic; wire shapes live in `inbound::http`.
//!
//! Public surface:
//! - Error / ErrorCode: domain error payload and its stable category.
//! - Slot, TimeRange, SlotKey: bookable schedule intervals.
//! - Appointment, BookingParty: committed bookings.
//! - Notification: per-user mailbox entries.
//! - User, Role, Service: directory entities.

pub mod appointment;
pub mod appointment_query_service;
pub mod auth;
pub mod availability_service;
pub mod booking;
pub mod booking_service;
pub mod catalogue_service;
pub mod error;
pub mod ids;
pub mod notification;
pub mod notification_service;
pub mod ports;
pub mod schedule;
pub mod service;
pub mod trace_id;
pub mod user;
pub mod user_account_service;

pub use self::appointment::{
    Appointment, AppointmentStatus, BookingParty, GuestContact, GuestContactError,
    ParseAppointmentStatusError,
};
pub use self::appointment_query_service::{AppointmentQueryService, week_bounds};
pub use self::auth::{
    LoginCredentials, LoginValidationError, MAX_USERNAME_LEN, Registration, RegistrationDraft,
    RegistrationValidationError,
};
pub use self::availability_service::AvailabilityService;
pub use self::booking::{
    BookingConfirmation, BookingPlan, BookingRecord, BookingRequest, EmailDelivery, EmailMessage,
    MAX_NOTIFICATION_MESSAGE_LEN, booking_notification_message,
};
pub use self::booking_service::{BookingService, DEFAULT_MAIL_TIMEOUT};
pub use self::catalogue_service::CatalogueService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{AppointmentId, NotificationId, ServiceId, SlotId, UserId};
pub use self::notification::{
    Notification, NotificationKind, NotificationStatus, ParseNotificationKindError,
    ParseNotificationStatusError,
};
pub use self::notification_service::NotificationService;
pub use self::schedule::{
    InvalidTimeRange, ParseSlotStatusError, Slot, SlotKey, SlotStatus, TimeRange,
};
pub use self::service::{
    BarberAvailability, BarberServiceLink, MAX_SERVICE_MINUTES, MAX_SERVICE_NAME_LEN,
    MAX_SERVICE_PRICE_CENTS, NewService, Service, ServiceChanges, ServiceDuration,
    ServiceDurationError,
};
pub use self::trace_id::TraceId;
pub use self::user::{
    Contact, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, NewUser, ParseRoleError, ProfileChanges,
    Role, User, UserCredentials,
};
pub use self::user_account_service::UserAccountService;
