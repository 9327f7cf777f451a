//! Port for the service catalogue and barber–service links.

use async_trait::async_trait;

use crate::domain::{
    BarberServiceLink, NewService, Service, ServiceChanges, ServiceId, User, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by service repository adapters.
    pub enum ServiceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "service repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "service repository query failed: {message}",
        /// Another service already uses the name.
        Duplicate { name: String } => "service name {name} is already taken",
        /// Appointments still reference the service.
        Referenced { service_id: ServiceId } =>
            "service {service_id} is referenced by appointments",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Every service ordered by name.
    async fn list_all(&self) -> Result<Vec<Service>, ServiceRepositoryError>;

    /// Services linked to the barber, ordered by name.
    async fn list_for_barber(
        &self,
        barber_id: &UserId,
    ) -> Result<Vec<Service>, ServiceRepositoryError>;

    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, ServiceRepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Service>, ServiceRepositoryError>;

    async fn create(&self, service: &NewService) -> Result<Service, ServiceRepositoryError>;

    /// Apply changes; `None` when the service does not exist.
    async fn update(
        &self,
        id: &ServiceId,
        changes: &ServiceChanges,
    ) -> Result<Option<Service>, ServiceRepositoryError>;

    /// Hard-delete the service and its links. Returns `false` when absent.
    async fn delete(&self, id: &ServiceId) -> Result<bool, ServiceRepositoryError>;

    /// Record that a barber offers a service. Linking twice is a no-op.
    async fn link(&self, link: &BarberServiceLink) -> Result<(), ServiceRepositoryError>;

    /// Remove a link. Returns `false` when it did not exist.
    async fn unlink(&self, link: &BarberServiceLink) -> Result<bool, ServiceRepositoryError>;

    /// Barbers linked to the service, ordered by id.
    async fn list_barbers_for_service(
        &self,
        id: &ServiceId,
    ) -> Result<Vec<User>, ServiceRepositoryError>;
}
