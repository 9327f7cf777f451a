//! Booking handler.
//!
//! ```text
//! POST /bookings {"barberId":2,"serviceId":1,"date":"2024-06-01",
//!                 "startTime":"09:00","endTime":"09:30","customerId":7}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    BookingParty, BookingRequest, EmailDelivery, Error, GuestContact, ServiceId, SlotKey,
    TimeRange, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::AppointmentResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, exclusive_fields_error, invalid_field_error, parse_date, parse_time,
};

/// Contact details for a booking made without an account.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

/// Body of `POST /bookings`. Supply `customerId` or `guest`, not both.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub barber_id: i32,
    pub service_id: i32,
    /// `YYYY-MM-DD` or RFC 2822.
    #[schema(example = "2024-06-01")]
    pub date: String,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "09:30")]
    pub end_time: String,
    pub customer_id: Option<i32>,
    pub guest: Option<GuestRequest>,
}

#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub appointment: AppointmentResponse,
    /// `sent`, or `disabled` when no mail transport is configured.
    #[schema(example = "sent")]
    pub email: String,
}

fn party(customer_id: Option<i32>, guest: Option<GuestRequest>) -> Result<BookingParty, Error> {
    match (customer_id, guest) {
        (Some(id), None) => Ok(BookingParty::Customer(UserId::new(id))),
        (None, Some(guest)) => GuestContact::try_new(
            &guest.first_name,
            &guest.last_name,
            &guest.email,
            &guest.phone_number,
        )
        .map(BookingParty::Guest)
        .map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": format!("guest.{}", err.field()) }))
        }),
        _ => Err(exclusive_fields_error(
            FieldName::new("customerId"),
            FieldName::new("guest"),
        )),
    }
}

impl TryFrom<CreateBookingRequest> for BookingRequest {
    type Error = Error;

    fn try_from(value: CreateBookingRequest) -> Result<Self, Self::Error> {
        let day = parse_date(&value.date, FieldName::new("date"))?;
        let start = parse_time(&value.start_time, FieldName::new("startTime"))?;
        let end = parse_time(&value.end_time, FieldName::new("endTime"))?;
        let range = TimeRange::new(start, end)
            .map_err(|err| invalid_field_error(FieldName::new("endTime"), err.to_string()))?;
        Ok(Self {
            slot: SlotKey {
                barber_id: UserId::new(value.barber_id),
                day,
                range,
            },
            service_id: ServiceId::new(value.service_id),
            party: party(value.customer_id, value.guest)?,
        })
    }
}

/// Book the exact slot named by barber, date, and times.
///
/// The appointment, slot flip, and barber notification commit together.
/// Emails go out afterwards; if they fail the booking stands and the
/// `502` error carries `details.appointmentId`.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Appointment confirmed", body = BookingResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown slot, barber, service or customer", body = ErrorSchema),
        (status = 409, description = "Slot already taken", body = ErrorSchema),
        (status = 502, description = "Booked, but email delivery failed", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBookingRequest>,
) -> ApiResult<HttpResponse> {
    let request = BookingRequest::try_from(payload.into_inner())?;
    let confirmation = state.bookings.create_booking(request).await?;
    let email = match confirmation.email {
        EmailDelivery::Sent => "sent",
        EmailDelivery::Disabled => "disabled",
    };
    info!(
        appointment_id = %confirmation.appointment.id,
        email,
        "booking request served"
    );
    Ok(HttpResponse::Created().json(BookingResponse {
        appointment: confirmation.appointment.into(),
        email: email.to_owned(),
    }))
}
