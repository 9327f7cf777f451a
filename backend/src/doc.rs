//! OpenAPI document for the booking API.
//!
//! Registers every handler, the wire DTOs, and the domain error wrappers from
//! [`crate::inbound::http::schemas`]. Swagger UI serves it at `/docs` in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::bookings::{
    BookingResponse, CreateBookingRequest, GuestRequest,
};
use crate::inbound::http::dto::{
    AppointmentResponse, BarberAvailabilityResponse, GuestResponse, NotificationResponse,
    ServiceResponse, SlotResponse, UserResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Barbershop booking API",
        description = "Availability, bookings, barber notifications, and the service directory."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::register,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::services::list_services,
        crate::inbound::http::services::list_barber_services,
        crate::inbound::http::services::add_service,
        crate::inbound::http::services::update_service,
        crate::inbound::http::services::delete_service,
        crate::inbound::http::services::service_availability,
        crate::inbound::http::schedule::available_dates,
        crate::inbound::http::schedule::available_time_slots,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::mark_as_read,
        crate::inbound::http::notifications::mark_all_as_read,
        crate::inbound::http::appointments::get_appointment,
        crate::inbound::http::appointments::appointments_for_barber,
        crate::inbound::http::appointments::daily_appointments,
        crate::inbound::http::appointments::weekly_appointments,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserResponse,
        ServiceResponse,
        SlotResponse,
        BarberAvailabilityResponse,
        GuestResponse,
        AppointmentResponse,
        NotificationResponse,
        CreateBookingRequest,
        GuestRequest,
        BookingResponse,
    )),
    tags(
        (name = "users", description = "Login, registration and profiles"),
        (name = "services", description = "Service catalogue and barber links"),
        (name = "schedule", description = "Open days and slots"),
        (name = "bookings", description = "Appointment booking"),
        (name = "notifications", description = "Barber notification inbox"),
        (name = "appointments", description = "Barber calendar views"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
