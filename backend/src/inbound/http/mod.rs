//! HTTP inbound adapter exposing the booking REST endpoints.

pub mod appointments;
pub mod bookings;
pub mod dto;
pub mod error;
pub mod health;
pub mod notifications;
pub mod schedule;
pub mod schemas;
pub mod services;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every booking endpoint and the shared extractor configs on a scope
/// or app.
///
/// ```
/// use actix_web::{App, web};
/// use barbershop::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .app_data(error::path_config())
        .service(users::login)
        .service(users::register)
        .service(users::update_profile)
        .service(services::list_services)
        .service(services::list_barber_services)
        .service(services::add_service)
        .service(services::update_service)
        .service(services::delete_service)
        .service(services::service_availability)
        .service(schedule::available_dates)
        .service(schedule::available_time_slots)
        .service(bookings::create_booking)
        .service(notifications::list_notifications)
        .service(notifications::mark_as_read)
        .service(notifications::mark_all_as_read)
        .service(appointments::get_appointment)
        .service(appointments::appointments_for_barber)
        .service(appointments::daily_appointments)
        .service(appointments::weekly_appointments)
        .service(health::ready)
        .service(health::live);
}
