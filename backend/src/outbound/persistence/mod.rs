//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository implements one domain port over a shared [`DbPool`].
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module; adapters translate rows into domain types and map Diesel
//! failures into the port's error enum.
//!
//! ```no_run
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! use barbershop::outbound::persistence::{DbPool, DieselScheduleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/barbershop")).await?;
//! let schedule = DieselScheduleRepository::new(pool.clone());
//! # let _ = schedule;
//! # Ok(())
//! # }
//! ```

mod diesel_appointment_repository;
mod diesel_booking_repository;
mod diesel_error_mapping;
mod diesel_notification_repository;
mod diesel_schedule_repository;
mod diesel_service_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_schedule_repository::DieselScheduleRepository;
pub use diesel_service_repository::DieselServiceRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
