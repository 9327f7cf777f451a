//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`BookingMailer`], [`PasswordHasher`]) are
//! implemented by outbound adapters and expose typed errors. Driving ports
//! are implemented by domain services and called by inbound adapters; they
//! return the domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod appointment_repository;
mod appointments_query;
mod availability_query;
mod booking_command;
mod booking_mailer;
mod booking_repository;
mod notification_inbox;
mod notification_repository;
mod password_hasher;
mod schedule_repository;
mod service_catalogue;
mod service_repository;
mod user_accounts;
mod user_repository;

#[cfg(test)]
pub use appointment_repository::MockAppointmentRepository;
pub use appointment_repository::{AppointmentRepository, AppointmentRepositoryError};
pub use appointments_query::AppointmentsQuery;
#[cfg(test)]
pub use appointments_query::MockAppointmentsQuery;
pub use availability_query::AvailabilityQuery;
#[cfg(test)]
pub use availability_query::MockAvailabilityQuery;
pub use booking_command::BookingCommand;
#[cfg(test)]
pub use booking_command::MockBookingCommand;
#[cfg(test)]
pub use booking_mailer::MockBookingMailer;
pub use booking_mailer::{BookingMailer, BookingMailerError, DisabledBookingMailer};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use notification_inbox::MockNotificationInbox;
pub use notification_inbox::NotificationInbox;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{NotificationRepository, NotificationRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use schedule_repository::MockScheduleRepository;
pub use schedule_repository::{ScheduleRepository, ScheduleRepositoryError};
#[cfg(test)]
pub use service_catalogue::MockServiceCatalogue;
pub use service_catalogue::{ServiceCatalogue, ServiceRemoval};
#[cfg(test)]
pub use service_repository::MockServiceRepository;
pub use service_repository::{ServiceRepository, ServiceRepositoryError};
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::UserAccounts;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
