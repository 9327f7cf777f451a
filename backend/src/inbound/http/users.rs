//! Account handlers.
//!
//! ```text
//! POST /login {"username":"bo","password":"secret"}
//! POST /register {"username":"cy","password":"pw","firstName":"Cy",...}
//! PUT /update-profile {"username":"cy","email":"cy@new.example"}
//! ```

use actix_web::{HttpResponse, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, ProfileChanges, Registration,
    RegistrationDraft, RegistrationValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::UserResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Login request body for `POST /login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Registration body for `POST /register`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_new(RegistrationDraft {
            username: &value.username,
            password: &value.password,
            first_name: &value.first_name,
            last_name: &value.last_name,
            email: &value.email,
            phone: &value.phone_number,
        })
    }
}

/// Profile update for `PUT /update-profile`. Absent fields keep their value.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// `{"user": {...}}` envelope returned by every account endpoint.
#[derive(Serialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

fn envelope(user: crate::domain::User) -> UserEnvelope {
    UserEnvelope { user: user.into() }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyUsername => ("username", "empty_username"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    let code = match err {
        RegistrationValidationError::EmptyField { .. } => "empty_field",
        RegistrationValidationError::TooLong { .. } => "too_long",
        RegistrationValidationError::InvalidEmail => "invalid_email",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": code }))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserEnvelope,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.users.login(&credentials).await?;
    session.persist_user(user.id)?;
    info!(user_id = %user.id, role = %user.role, "user logged in");
    Ok(HttpResponse::Ok().json(envelope(user)))
}

/// Create a customer account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username, email or phone already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_registration_error)?;
    let user = state.users.register(registration).await?;
    info!(user_id = %user.id, "customer registered");
    Ok(HttpResponse::Created().json(envelope(user)))
}

/// Update profile fields of the named account.
#[utoipa::path(
    put,
    path = "/update-profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown username", body = ErrorSchema),
        (status = 409, description = "Email or phone already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/update-profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let UpdateProfileRequest {
        username,
        first_name,
        last_name,
        email,
        phone_number,
    } = payload.into_inner();
    let username = username
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| missing_field_error(FieldName::new("username")))?;
    let changes = ProfileChanges {
        first_name,
        last_name,
        email,
        phone: phone_number,
    };
    let user = state.users.update_profile(username.trim(), changes).await?;
    Ok(web::Json(envelope(user)))
}

#[cfg(test)]
mod tests;
