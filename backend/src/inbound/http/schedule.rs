//! Availability handlers for the booking calendar.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::UserId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{SlotResponse, wire_date};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_date};

const DATE: FieldName = FieldName::new("date");

#[derive(Serialize, ToSchema)]
pub struct DatesEnvelope {
    #[schema(example = json!(["2024-06-01", "2024-06-02"]))]
    pub dates: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SlotsEnvelope {
    pub slots: Vec<SlotResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SlotsQuery {
    /// `YYYY-MM-DD` or RFC 2822.
    pub date: Option<String>,
}

/// Days on which the barber still has an open slot, ascending.
#[utoipa::path(
    get,
    path = "/schedule/{barber_id}/available-dates",
    params(("barber_id" = i32, Path, description = "Barber user id")),
    responses(
        (status = 200, description = "Open days", body = DatesEnvelope),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["schedule"],
    operation_id = "availableDates"
)]
#[get("/schedule/{barber_id}/available-dates")]
pub async fn available_dates(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DatesEnvelope>> {
    let barber_id = UserId::new(path.into_inner());
    let dates = state.availability.available_dates(barber_id).await?;
    Ok(web::Json(DatesEnvelope {
        dates: dates.into_iter().map(wire_date).collect(),
    }))
}

/// Open slots for one barber on one day, by start time.
#[utoipa::path(
    get,
    path = "/schedule/{barber_id}/available-time-slots",
    params(("barber_id" = i32, Path, description = "Barber user id"), SlotsQuery),
    responses(
        (status = 200, description = "Open slots", body = SlotsEnvelope),
        (status = 400, description = "Missing or malformed date", body = ErrorSchema)
    ),
    tags = ["schedule"],
    operation_id = "availableTimeSlots"
)]
#[get("/schedule/{barber_id}/available-time-slots")]
pub async fn available_time_slots(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<SlotsQuery>,
) -> ApiResult<web::Json<SlotsEnvelope>> {
    let barber_id = UserId::new(path.into_inner());
    let raw = query
        .into_inner()
        .date
        .ok_or_else(|| missing_field_error(DATE))?;
    let day = parse_date(&raw, DATE)?;
    let slots = state.availability.available_slots(barber_id, day).await?;
    Ok(web::Json(SlotsEnvelope {
        slots: slots.into_iter().map(Into::into).collect(),
    }))
}
