//! Read-only appointment views for barbers.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Appointment, AppointmentId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::AppointmentResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, parse_optional_date};

#[derive(Serialize, ToSchema)]
pub struct AppointmentEnvelope {
    pub appointment: AppointmentResponse,
}

#[derive(Serialize, ToSchema)]
pub struct AppointmentListEnvelope {
    pub appointments: Vec<AppointmentResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct WeeklyQuery {
    /// Any day in the wanted week; defaults to today.
    pub week_of: Option<String>,
}

fn listing(appointments: Vec<Appointment>) -> web::Json<AppointmentListEnvelope> {
    web::Json(AppointmentListEnvelope {
        appointments: appointments.into_iter().map(Into::into).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/appointments/{id}",
    params(("id" = i32, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment", body = AppointmentEnvelope),
        (status = 404, description = "Unknown appointment", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "getAppointment"
)]
#[get("/appointments/{id}")]
pub async fn get_appointment(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<AppointmentEnvelope>> {
    let appointment = state
        .appointments
        .get_appointment(AppointmentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(AppointmentEnvelope {
        appointment: appointment.into(),
    }))
}

/// Every appointment of a barber, earliest first.
#[utoipa::path(
    get,
    path = "/appointmentsforbarber/{id}",
    params(("id" = i32, Path, description = "Barber user id")),
    responses(
        (status = 200, description = "Appointments", body = AppointmentListEnvelope)
    ),
    tags = ["appointments"],
    operation_id = "listBarberAppointments"
)]
#[get("/appointmentsforbarber/{id}")]
pub async fn appointments_for_barber(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<AppointmentListEnvelope>> {
    let barber_id = UserId::new(path.into_inner());
    Ok(listing(state.appointments.list_for_barber(barber_id).await?))
}

#[utoipa::path(
    get,
    path = "/dailyappointments/{barber_id}/{date}",
    params(
        ("barber_id" = i32, Path, description = "Barber user id"),
        ("date" = String, Path, description = "`YYYY-MM-DD` or RFC 2822")
    ),
    responses(
        (status = 200, description = "Appointments on the day", body = AppointmentListEnvelope),
        (status = 400, description = "Malformed date", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "dailyAppointments"
)]
#[get("/dailyappointments/{barber_id}/{date}")]
pub async fn daily_appointments(
    state: web::Data<HttpState>,
    path: web::Path<(i32, String)>,
) -> ApiResult<web::Json<AppointmentListEnvelope>> {
    let (barber_id, raw_date) = path.into_inner();
    let day = parse_date(&raw_date, FieldName::new("date"))?;
    Ok(listing(
        state
            .appointments
            .list_daily(UserId::new(barber_id), day)
            .await?,
    ))
}

/// Monday-to-Sunday week containing `weekOf`.
#[utoipa::path(
    get,
    path = "/weeklyappointments/{id}",
    params(("id" = i32, Path, description = "Barber user id"), WeeklyQuery),
    responses(
        (status = 200, description = "Appointments in the week", body = AppointmentListEnvelope),
        (status = 400, description = "Malformed weekOf", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "weeklyAppointments"
)]
#[get("/weeklyappointments/{id}")]
pub async fn weekly_appointments(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<WeeklyQuery>,
) -> ApiResult<web::Json<AppointmentListEnvelope>> {
    let week_of = parse_optional_date(query.week_of.as_deref(), FieldName::new("weekOf"))?;
    Ok(listing(
        state
            .appointments
            .list_weekly(UserId::new(path.into_inner()), week_of)
            .await?,
    ))
}
