//! Driving port for the service catalogue.

use async_trait::async_trait;

use crate::domain::{
    BarberAvailability, Error, NewService, Service, ServiceChanges, ServiceId, UserId,
};

/// What a delete request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceRemoval {
    /// The service and every link to it were removed.
    Deleted,
    /// Only the acting barber's link was removed.
    Unlinked,
}

/// Catalogue reads plus role-gated mutations.
///
/// Mutations take the acting user's id and resolve their role; callers that
/// are neither admin nor barber receive `Forbidden`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceCatalogue: Send + Sync {
    async fn list_services(&self) -> Result<Vec<Service>, Error>;

    async fn list_barber_services(&self, barber_id: UserId) -> Result<Vec<Service>, Error>;

    /// Admins create; barbers create or reuse by name and link to themselves.
    async fn add_service(&self, acting_user: UserId, service: NewService)
    -> Result<Service, Error>;

    /// Admin-only partial update.
    async fn update_service(
        &self,
        service_id: ServiceId,
        acting_user: UserId,
        changes: ServiceChanges,
    ) -> Result<Service, Error>;

    /// Admins hard-delete; barbers unlink their own offering.
    async fn delete_service(
        &self,
        service_id: ServiceId,
        acting_user: UserId,
    ) -> Result<ServiceRemoval, Error>;

    /// Barbers offering the service with their open slots.
    async fn service_availability(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<BarberAvailability>, Error>;
}
