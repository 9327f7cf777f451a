//! PostgreSQL-backed `AppointmentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AppointmentRepository, AppointmentRepositoryError};
use crate::domain::{Appointment, AppointmentId, UserId};

use super::diesel_error_mapping::{collect_rows, map_diesel_error, map_pool_error};
use super::models::AppointmentRow;
use super::pool::{DbPool, PoolError};
use super::schema::appointments;

/// Diesel-backed appointment views.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> AppointmentRepositoryError {
    map_pool_error(error, AppointmentRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> AppointmentRepositoryError {
    map_diesel_error(
        error,
        AppointmentRepositoryError::query,
        AppointmentRepositoryError::connection,
    )
}

fn into_appointments(
    rows: Vec<AppointmentRow>,
) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
    collect_rows(
        rows,
        AppointmentRow::into_domain,
        AppointmentRepositoryError::query,
    )
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn find_by_id(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<AppointmentRow> = appointments::table
            .find(id.get())
            .select(AppointmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        row.map(|row| row.into_domain().map_err(AppointmentRepositoryError::query))
            .transpose()
    }

    async fn list_for_barber(
        &self,
        barber_id: &UserId,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<AppointmentRow> = appointments::table
            .filter(appointments::barber_id.eq(barber_id.get()))
            .select(AppointmentRow::as_select())
            .order_by((appointments::starts_at.asc(), appointments::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        into_appointments(rows)
    }

    async fn list_for_barber_between(
        &self,
        barber_id: &UserId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let from = first.and_time(NaiveTime::MIN);
        // Exclusive upper bound: midnight after `last`.
        let until = last
            .and_time(NaiveTime::MIN)
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDateTime::MAX);

        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<AppointmentRow> = appointments::table
            .filter(appointments::barber_id.eq(barber_id.get()))
            .filter(appointments::starts_at.ge(from))
            .filter(appointments::starts_at.lt(until))
            .select(AppointmentRow::as_select())
            .order_by((appointments::starts_at.asc(), appointments::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        into_appointments(rows)
    }
}
