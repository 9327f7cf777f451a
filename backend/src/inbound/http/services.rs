//! Catalogue handlers.
//!
//! Mutations name the acting user in the body or path; the session must
//! belong to that user before the catalogue applies its role rules.

use actix_web::{HttpResponse, delete, get, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ServiceRemoval;
use crate::domain::{
    Error, NewService, ServiceChanges, ServiceDuration, ServiceDurationError, ServiceId, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{BarberAvailabilityResponse, ServiceResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error};

const DURATION: FieldName = FieldName::new("duration");

/// Duration as whole minutes (`30`) or legacy text (`"1 hour 15 min"`).
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DurationInput {
    Minutes(u32),
    Text(String),
}

impl DurationInput {
    fn parse(self) -> Result<ServiceDuration, Error> {
        let parsed = match self {
            Self::Minutes(minutes) => ServiceDuration::from_minutes(minutes),
            Self::Text(text) => text.parse(),
        };
        parsed.map_err(|err: ServiceDurationError| invalid_field_error(DURATION, err.to_string()))
    }
}

/// Body of `POST /addservice`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddServiceRequest {
    /// Admin or barber performing the change.
    pub user_id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = String, example = "25.00")]
    pub price: Decimal,
    pub duration: DurationInput,
}

/// Body of `PUT /updateservice/{id}`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub user_id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub duration: Option<DurationInput>,
}

#[derive(Serialize, ToSchema)]
pub struct ServiceEnvelope {
    pub service: ServiceResponse,
}

#[derive(Serialize, ToSchema)]
pub struct ServiceListEnvelope {
    pub services: Vec<ServiceResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct RemovalResponse {
    /// `deleted` for an admin hard delete, `unlinked` for a barber.
    #[schema(example = "unlinked")]
    pub result: String,
}

#[derive(Serialize, ToSchema)]
pub struct AvailabilityEnvelope {
    pub barbers: Vec<BarberAvailabilityResponse>,
}

fn service_list(services: Vec<crate::domain::Service>) -> web::Json<ServiceListEnvelope> {
    web::Json(ServiceListEnvelope {
        services: services.into_iter().map(Into::into).collect(),
    })
}

/// Whole catalogue ordered by name.
#[utoipa::path(
    get,
    path = "/services",
    responses(
        (status = 200, description = "Catalogue", body = ServiceListEnvelope),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "listServices"
)]
#[get("/services")]
pub async fn list_services(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ServiceListEnvelope>> {
    Ok(service_list(state.catalogue.list_services().await?))
}

/// Services one barber offers.
#[utoipa::path(
    get,
    path = "/services/{barber_id}",
    params(("barber_id" = i32, Path, description = "Barber user id")),
    responses(
        (status = 200, description = "Barber's services", body = ServiceListEnvelope),
        (status = 404, description = "Unknown barber", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "listBarberServices"
)]
#[get("/services/{barber_id}")]
pub async fn list_barber_services(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ServiceListEnvelope>> {
    let barber_id = UserId::new(path.into_inner());
    Ok(service_list(
        state.catalogue.list_barber_services(barber_id).await?,
    ))
}

/// Create a service; barbers reuse an existing name and link it to themselves.
#[utoipa::path(
    post,
    path = "/addservice",
    request_body = AddServiceRequest,
    responses(
        (status = 201, description = "Service created or linked", body = ServiceEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Not logged in", body = ErrorSchema),
        (status = 403, description = "Caller may not manage services", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "addService"
)]
#[post("/addservice")]
pub async fn add_service(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddServiceRequest>,
) -> ApiResult<HttpResponse> {
    let AddServiceRequest {
        user_id,
        name,
        description,
        price,
        duration,
    } = payload.into_inner();
    let acting_user = session.require_acting_user(UserId::new(user_id))?;
    let service = NewService {
        name,
        description,
        price,
        duration: duration.parse()?,
    };
    let created = state.catalogue.add_service(acting_user, service).await?;
    Ok(HttpResponse::Created().json(ServiceEnvelope {
        service: created.into(),
    }))
}

/// Admin edit of a catalogue entry.
#[utoipa::path(
    put,
    path = "/updateservice/{id}",
    params(("id" = i32, Path, description = "Service id")),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Updated service", body = ServiceEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown service", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "updateService"
)]
#[put("/updateservice/{id}")]
pub async fn update_service(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<UpdateServiceRequest>,
) -> ApiResult<web::Json<ServiceEnvelope>> {
    let UpdateServiceRequest {
        user_id,
        name,
        description,
        price,
        duration,
    } = payload.into_inner();
    let acting_user = session.require_acting_user(UserId::new(user_id))?;
    let changes = ServiceChanges {
        name,
        description,
        price,
        duration: duration.map(DurationInput::parse).transpose()?,
    };
    let service_id = ServiceId::new(path.into_inner());
    let updated = state
        .catalogue
        .update_service(service_id, acting_user, changes)
        .await?;
    Ok(web::Json(ServiceEnvelope {
        service: updated.into(),
    }))
}

/// Admins delete the service; barbers drop their own link to it.
#[utoipa::path(
    delete,
    path = "/services/{id}/{user_id}",
    params(
        ("id" = i32, Path, description = "Service id"),
        ("user_id" = i32, Path, description = "Acting user id")
    ),
    responses(
        (status = 200, description = "Deleted or unlinked", body = RemovalResponse),
        (status = 403, description = "Caller may not remove this service", body = ErrorSchema),
        (status = 404, description = "Unknown service or link", body = ErrorSchema),
        (status = 409, description = "Service is referenced by appointments", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "deleteService"
)]
#[delete("/services/{id}/{user_id}")]
pub async fn delete_service(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(i32, i32)>,
) -> ApiResult<web::Json<RemovalResponse>> {
    let (service_id, user_id) = path.into_inner();
    let acting_user = session.require_acting_user(UserId::new(user_id))?;
    let removal = state
        .catalogue
        .delete_service(ServiceId::new(service_id), acting_user)
        .await?;
    let result = match removal {
        ServiceRemoval::Deleted => "deleted",
        ServiceRemoval::Unlinked => "unlinked",
    };
    Ok(web::Json(RemovalResponse {
        result: result.to_owned(),
    }))
}

/// Barbers offering a service with their open slots.
#[utoipa::path(
    get,
    path = "/service/{id}/availability",
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "Barbers and slots", body = AvailabilityEnvelope),
        (status = 404, description = "Unknown service", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "serviceAvailability"
)]
#[get("/service/{id}/availability")]
pub async fn service_availability(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<AvailabilityEnvelope>> {
    let barbers = state
        .catalogue
        .service_availability(ServiceId::new(path.into_inner()))
        .await?;
    Ok(web::Json(AvailabilityEnvelope {
        barbers: barbers.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod tests;
