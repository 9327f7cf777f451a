//! Service catalogue: public reads and role-gated mutations.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use crate::domain::availability_service::map_schedule_error;
use crate::domain::ports::{
    ScheduleRepository, ServiceCatalogue, ServiceRemoval, ServiceRepository,
    ServiceRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    BarberAvailability, BarberServiceLink, Error, MAX_SERVICE_NAME_LEN, MAX_SERVICE_PRICE_CENTS,
    NewService, Role, Service, ServiceChanges, ServiceId, Slot, User, UserId,
};

fn map_service_error(error: ServiceRepositoryError) -> Error {
    match error {
        ServiceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("service repository unavailable: {message}"))
        }
        ServiceRepositoryError::Query { message } => {
            Error::internal(format!("service repository error: {message}"))
        }
        err @ (ServiceRepositoryError::Duplicate { .. }
        | ServiceRepositoryError::Referenced { .. }) => Error::conflict(err.to_string()),
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } | UserPersistenceError::Duplicate { field: message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn invalid_field(field: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": "invalid" }))
}

fn validate_name(name: &str) -> Result<String, Error> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(invalid_field("name", "service name must not be empty"));
    }
    if trimmed.chars().count() > MAX_SERVICE_NAME_LEN {
        return Err(invalid_field(
            "name",
            format!("service name must be at most {MAX_SERVICE_NAME_LEN} characters"),
        ));
    }
    Ok(trimmed.to_owned())
}

fn validate_price(price: Decimal) -> Result<Decimal, Error> {
    if price.is_sign_negative() {
        return Err(invalid_field("price", "service price must not be negative"));
    }
    let rounded = price.round_dp(2);
    let ceiling = Decimal::new(MAX_SERVICE_PRICE_CENTS, 2);
    if rounded > ceiling {
        return Err(invalid_field(
            "price",
            format!("service price must be at most {ceiling}"),
        ));
    }
    Ok(rounded)
}

fn validate_new_service(service: NewService) -> Result<NewService, Error> {
    Ok(NewService {
        name: validate_name(&service.name)?,
        description: service.description.trim().to_owned(),
        price: validate_price(service.price)?,
        duration: service.duration,
    })
}

fn validate_changes(changes: ServiceChanges) -> Result<ServiceChanges, Error> {
    if changes.is_empty() {
        return Err(Error::invalid_request("no service fields supplied"));
    }
    Ok(ServiceChanges {
        name: changes.name.as_deref().map(validate_name).transpose()?,
        description: changes.description.map(|text| text.trim().to_owned()),
        price: changes.price.map(validate_price).transpose()?,
        duration: changes.duration,
    })
}

/// Catalogue service over service, user, and schedule repositories.
#[derive(Clone)]
pub struct CatalogueService<S, U, R> {
    service_repo: Arc<S>,
    user_repo: Arc<U>,
    schedule_repo: Arc<R>,
}

impl<S, U, R> CatalogueService<S, U, R> {
    /// Create the service with the given repositories.
    pub fn new(service_repo: Arc<S>, user_repo: Arc<U>, schedule_repo: Arc<R>) -> Self {
        Self {
            service_repo,
            user_repo,
            schedule_repo,
        }
    }
}

impl<S, U, R> CatalogueService<S, U, R>
where
    S: ServiceRepository,
    U: UserRepository,
{
    /// Resolve the acting user's role; unknown ids may not mutate anything.
    async fn acting_role(&self, acting_user: UserId) -> Result<Role, Error> {
        let user = self
            .user_repo
            .find_by_id(&acting_user)
            .await
            .map_err(map_user_error)?;
        user.map(|user| user.role)
            .ok_or_else(|| Error::forbidden(format!("user {acting_user} may not manage services")))
    }

    /// Create the service, or reuse an existing one with the same name.
    async fn find_or_create(&self, service: &NewService) -> Result<Service, Error> {
        if let Some(existing) = self
            .service_repo
            .find_by_name(&service.name)
            .await
            .map_err(map_service_error)?
        {
            return Ok(existing);
        }
        match self.service_repo.create(service).await {
            Ok(created) => Ok(created),
            // Lost a race with a concurrent create of the same name.
            Err(ServiceRepositoryError::Duplicate { .. }) => self
                .service_repo
                .find_by_name(&service.name)
                .await
                .map_err(map_service_error)?
                .ok_or_else(|| Error::conflict(format!("service {} changed concurrently", service.name))),
            Err(err) => Err(map_service_error(err)),
        }
    }
}

fn forbidden(acting_user: UserId, action: &str) -> Error {
    Error::forbidden(format!("user {acting_user} may not {action}"))
}

#[async_trait]
impl<S, U, R> ServiceCatalogue for CatalogueService<S, U, R>
where
    S: ServiceRepository,
    U: UserRepository,
    R: ScheduleRepository,
{
    async fn list_services(&self) -> Result<Vec<Service>, Error> {
        self.service_repo.list_all().await.map_err(map_service_error)
    }

    async fn list_barber_services(&self, barber_id: UserId) -> Result<Vec<Service>, Error> {
        self.service_repo
            .list_for_barber(&barber_id)
            .await
            .map_err(map_service_error)
    }

    async fn add_service(
        &self,
        acting_user: UserId,
        service: NewService,
    ) -> Result<Service, Error> {
        let service = validate_new_service(service)?;
        match self.acting_role(acting_user).await? {
            Role::Admin => {
                let created = self
                    .service_repo
                    .create(&service)
                    .await
                    .map_err(map_service_error)?;
                info!(service_id = created.id.get(), "service created");
                Ok(created)
            }
            Role::Barber => {
                let offered = self.find_or_create(&service).await?;
                self.service_repo
                    .link(&BarberServiceLink {
                        barber_id: acting_user,
                        service_id: offered.id,
                    })
                    .await
                    .map_err(map_service_error)?;
                info!(
                    service_id = offered.id.get(),
                    barber_id = acting_user.get(),
                    "service linked to barber"
                );
                Ok(offered)
            }
            Role::Customer | Role::Guest => Err(forbidden(acting_user, "add services")),
        }
    }

    async fn update_service(
        &self,
        service_id: ServiceId,
        acting_user: UserId,
        changes: ServiceChanges,
    ) -> Result<Service, Error> {
        if self.acting_role(acting_user).await? != Role::Admin {
            return Err(forbidden(acting_user, "update services"));
        }
        let changes = validate_changes(changes)?;
        self.service_repo
            .update(&service_id, &changes)
            .await
            .map_err(map_service_error)?
            .ok_or_else(|| Error::not_found(format!("service {service_id} not found")))
    }

    async fn delete_service(
        &self,
        service_id: ServiceId,
        acting_user: UserId,
    ) -> Result<ServiceRemoval, Error> {
        match self.acting_role(acting_user).await? {
            Role::Admin => {
                let deleted = self
                    .service_repo
                    .delete(&service_id)
                    .await
                    .map_err(map_service_error)?;
                if !deleted {
                    return Err(Error::not_found(format!("service {service_id} not found")));
                }
                info!(service_id = service_id.get(), "service deleted");
                Ok(ServiceRemoval::Deleted)
            }
            Role::Barber => {
                let unlinked = self
                    .service_repo
                    .unlink(&BarberServiceLink {
                        barber_id: acting_user,
                        service_id,
                    })
                    .await
                    .map_err(map_service_error)?;
                if !unlinked {
                    return Err(Error::not_found(format!(
                        "barber {acting_user} does not offer service {service_id}"
                    )));
                }
                Ok(ServiceRemoval::Unlinked)
            }
            Role::Customer | Role::Guest => Err(forbidden(acting_user, "delete services")),
        }
    }

    async fn service_availability(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<BarberAvailability>, Error> {
        self.service_repo
            .find_by_id(&service_id)
            .await
            .map_err(map_service_error)?
            .ok_or_else(|| Error::not_found(format!("service {service_id} not found")))?;

        let barbers: Vec<User> = self
            .service_repo
            .list_barbers_for_service(&service_id)
            .await
            .map_err(map_service_error)?;

        let mut availability = Vec::with_capacity(barbers.len());
        for barber in barbers {
            let slots = self
                .schedule_repo
                .list_barber_slots(&barber.id)
                .await
                .map_err(map_schedule_error)?
                .into_iter()
                .filter(Slot::is_available)
                .collect();
            availability.push(BarberAvailability { barber, slots });
        }
        Ok(availability)
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
