//! Barber notification inbox handlers.

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{NotificationId, NotificationStatus, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::NotificationResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

#[derive(Serialize, ToSchema)]
pub struct NotificationsEnvelope {
    pub notifications: Vec<NotificationResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct MarkReadResponse {
    pub id: i32,
    #[schema(example = "read")]
    pub status: String,
}

/// Body of `PUT /mark-all-as-read`.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct MarkAllReadRequest {
    pub ids: Vec<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct MarkAllReadResponse {
    /// Rows that moved from unread to read.
    pub updated: usize,
}

/// Newest first.
#[utoipa::path(
    get,
    path = "/notifications/{user_id}",
    params(("user_id" = i32, Path, description = "Recipient user id")),
    responses(
        (status = 200, description = "Notifications", body = NotificationsEnvelope),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications/{user_id}")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<NotificationsEnvelope>> {
    let notifications = state
        .notifications
        .list(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(NotificationsEnvelope {
        notifications: notifications.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    put,
    path = "/mark-as-read/{id}",
    params(("id" = i32, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Marked read (repeat calls succeed)", body = MarkReadResponse),
        (status = 404, description = "Unknown notification", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markAsRead"
)]
#[put("/mark-as-read/{id}")]
pub async fn mark_as_read(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MarkReadResponse>> {
    let id = NotificationId::new(path.into_inner());
    state.notifications.mark_read(id).await?;
    Ok(web::Json(MarkReadResponse {
        id: id.get(),
        status: NotificationStatus::Read.as_str().to_owned(),
    }))
}

/// Unknown ids are skipped.
#[utoipa::path(
    put,
    path = "/mark-all-as-read",
    request_body = MarkAllReadRequest,
    responses(
        (status = 200, description = "Count of changed rows", body = MarkAllReadResponse),
        (status = 400, description = "Malformed body", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markAllAsRead"
)]
#[put("/mark-all-as-read")]
pub async fn mark_all_as_read(
    state: web::Data<HttpState>,
    payload: web::Json<MarkAllReadRequest>,
) -> ApiResult<web::Json<MarkAllReadResponse>> {
    let ids = payload
        .into_inner()
        .ids
        .into_iter()
        .map(NotificationId::new)
        .collect();
    let updated = state.notifications.mark_all_read(ids).await?;
    Ok(web::Json(MarkAllReadResponse { updated }))
}
