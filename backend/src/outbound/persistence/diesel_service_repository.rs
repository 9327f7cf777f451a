//! PostgreSQL-backed `ServiceRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ServiceRepository, ServiceRepositoryError};
use crate::domain::{
    BarberServiceLink, NewService, Role, Service, ServiceChanges, ServiceId, User, UserId,
};

use super::diesel_error_mapping::{
    Violation, collect_rows, map_diesel_error, map_pool_error, violated_constraint,
};
use super::models::{
    NewBarberServiceRow, NewServiceRow, ServiceRow, ServiceUpdate, UserRow, duration_column,
};
use super::pool::{DbPool, PoolError};
use super::schema::{barber_services, services, users};

const SERVICE_NAME_KEY: &str = "services_name_key";

/// Diesel-backed service catalogue.
#[derive(Clone)]
pub struct DieselServiceRepository {
    pool: DbPool,
}

impl DieselServiceRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ServiceRepositoryError {
    map_pool_error(error, ServiceRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ServiceRepositoryError {
    map_diesel_error(
        error,
        ServiceRepositoryError::query,
        ServiceRepositoryError::connection,
    )
}

/// Map a write failure, naming the service when its unique name clashes.
fn map_write(error: diesel::result::Error, name: Option<&str>) -> ServiceRepositoryError {
    match violated_constraint(&error) {
        Some((Violation::Unique, SERVICE_NAME_KEY)) => {
            ServiceRepositoryError::duplicate(name.unwrap_or_default())
        }
        _ => map_diesel(error),
    }
}

fn into_service(row: ServiceRow) -> Result<Service, ServiceRepositoryError> {
    row.into_domain().map_err(ServiceRepositoryError::query)
}

fn into_services(rows: Vec<ServiceRow>) -> Result<Vec<Service>, ServiceRepositoryError> {
    collect_rows(rows, ServiceRow::into_domain, ServiceRepositoryError::query)
}

#[async_trait]
impl ServiceRepository for DieselServiceRepository {
    async fn list_all(&self) -> Result<Vec<Service>, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<ServiceRow> = services::table
            .select(ServiceRow::as_select())
            .order_by((services::name.asc(), services::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        into_services(rows)
    }

    async fn list_for_barber(
        &self,
        barber_id: &UserId,
    ) -> Result<Vec<Service>, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<ServiceRow> = services::table
            .inner_join(barber_services::table)
            .filter(barber_services::barber_id.eq(barber_id.get()))
            .select(ServiceRow::as_select())
            .order_by((services::name.asc(), services::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        into_services(rows)
    }

    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<ServiceRow> = services::table
            .find(id.get())
            .select(ServiceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        row.map(into_service).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Service>, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<ServiceRow> = services::table
            .filter(services::name.eq(name))
            .select(ServiceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        row.map(into_service).transpose()
    }

    async fn create(&self, service: &NewService) -> Result<Service, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: ServiceRow = diesel::insert_into(services::table)
            .values(&NewServiceRow {
                name: &service.name,
                description: &service.description,
                price: service.price,
                duration_minutes: duration_column(service.duration),
            })
            .returning(ServiceRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write(err, Some(&service.name)))?;
        into_service(row)
    }

    async fn update(
        &self,
        id: &ServiceId,
        changes: &ServiceChanges,
    ) -> Result<Option<Service>, ServiceRepositoryError> {
        let update = ServiceUpdate {
            name: changes.name.as_deref(),
            description: changes.description.as_deref(),
            price: changes.price,
            duration_minutes: changes.duration.map(duration_column),
        };
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<ServiceRow> = diesel::update(services::table.find(id.get()))
            .set(&update)
            .returning(ServiceRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write(err, changes.name.as_deref()))?;
        row.map(into_service).transpose()
    }

    async fn delete(&self, id: &ServiceId) -> Result<bool, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let deleted = diesel::delete(services::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| match violated_constraint(&err) {
                // Links cascade; only appointments restrict deletion.
                Some((Violation::ForeignKey, _)) => ServiceRepositoryError::referenced(*id),
                _ => map_diesel(err),
            })?;
        Ok(deleted > 0)
    }

    async fn link(&self, link: &BarberServiceLink) -> Result<(), ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        diesel::insert_into(barber_services::table)
            .values(&NewBarberServiceRow {
                barber_id: link.barber_id.get(),
                service_id: link.service_id.get(),
            })
            .on_conflict((barber_services::barber_id, barber_services::service_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(())
    }

    async fn unlink(&self, link: &BarberServiceLink) -> Result<bool, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let removed = diesel::delete(
            barber_services::table
                .filter(barber_services::barber_id.eq(link.barber_id.get()))
                .filter(barber_services::service_id.eq(link.service_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;
        Ok(removed > 0)
    }

    async fn list_barbers_for_service(
        &self,
        id: &ServiceId,
    ) -> Result<Vec<User>, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<UserRow> = users::table
            .inner_join(barber_services::table)
            .filter(barber_services::service_id.eq(id.get()))
            .filter(users::role.eq(Role::Barber.as_str()))
            .select(UserRow::as_select())
            .order_by(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        collect_rows(rows, UserRow::into_domain, ServiceRepositoryError::query)
    }
}
