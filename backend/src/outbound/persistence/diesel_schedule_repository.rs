//! PostgreSQL-backed `ScheduleRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ScheduleRepository, ScheduleRepositoryError};
use crate::domain::{Slot, SlotStatus, UserId};

use super::diesel_error_mapping::{collect_rows, map_diesel_error, map_pool_error};
use super::models::SlotRow;
use super::pool::{DbPool, PoolError};
use super::schema::schedule;

/// Diesel-backed read access to barber schedules.
#[derive(Clone)]
pub struct DieselScheduleRepository {
    pool: DbPool,
}

impl DieselScheduleRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ScheduleRepositoryError {
    map_pool_error(error, ScheduleRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ScheduleRepositoryError {
    map_diesel_error(
        error,
        ScheduleRepositoryError::query,
        ScheduleRepositoryError::connection,
    )
}

fn into_slots(rows: Vec<SlotRow>) -> Result<Vec<Slot>, ScheduleRepositoryError> {
    collect_rows(rows, SlotRow::into_domain, ScheduleRepositoryError::query)
}

#[async_trait]
impl ScheduleRepository for DieselScheduleRepository {
    async fn list_available_dates(
        &self,
        barber_id: &UserId,
    ) -> Result<Vec<NaiveDate>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        schedule::table
            .filter(schedule::barber_id.eq(barber_id.get()))
            .filter(schedule::status.eq(SlotStatus::Available.as_str()))
            .select(schedule::day)
            .distinct()
            .order_by(schedule::day.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel)
    }

    async fn list_available_slots(
        &self,
        barber_id: &UserId,
        day: NaiveDate,
    ) -> Result<Vec<Slot>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<SlotRow> = schedule::table
            .filter(schedule::barber_id.eq(barber_id.get()))
            .filter(schedule::day.eq(day))
            .filter(schedule::status.eq(SlotStatus::Available.as_str()))
            .select(SlotRow::as_select())
            .order_by((schedule::start_time.asc(), schedule::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        into_slots(rows)
    }

    async fn list_barber_slots(
        &self,
        barber_id: &UserId,
    ) -> Result<Vec<Slot>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<SlotRow> = schedule::table
            .filter(schedule::barber_id.eq(barber_id.get()))
            .select(SlotRow::as_select())
            .order_by((schedule::day.asc(), schedule::start_time.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        into_slots(rows)
    }
}
