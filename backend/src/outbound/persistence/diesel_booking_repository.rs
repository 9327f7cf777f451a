//! PostgreSQL-backed `BookingRepository`: the booking unit of work.
//!
//! One Diesel transaction resolves the barber, service, and customer, locks
//! the requested slot row, inserts the appointment, flips the slot with a
//! compare-and-swap update, and writes the barber's notification. Any
//! rejection or database failure rolls every step back.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{
    AppointmentStatus, BookingParty, BookingPlan, BookingRecord, Contact, NotificationKind,
    NotificationStatus, Role, SlotKey, SlotStatus, booking_notification_message,
};

use super::diesel_error_mapping::{
    Violation, map_diesel_error, map_pool_error, violated_constraint,
};
use super::models::{
    AppointmentRow, NewAppointmentRow, NewNotificationRow, ServiceRow, SlotRow, UserRow,
};
use super::pool::DbPool;
use super::schema::{appointments, notifications, schedule, services, users};

/// Unique index guaranteeing one appointment per slot.
const ONE_APPOINTMENT_PER_SLOT: &str = "appointments_schedule_id_key";

/// Diesel-backed booking transaction.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Why the transaction closure bailed out.
#[derive(Debug)]
enum CommitError {
    Rejected(BookingRepositoryError),
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for CommitError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Database(error)
    }
}

fn reject(error: BookingRepositoryError) -> CommitError {
    CommitError::Rejected(error)
}

fn malformed(message: String) -> CommitError {
    reject(BookingRepositoryError::query(message))
}

fn map_database_error(error: diesel::result::Error, slot: SlotKey) -> BookingRepositoryError {
    if let Some((Violation::Unique, ONE_APPOINTMENT_PER_SLOT)) = violated_constraint(&error) {
        return BookingRepositoryError::slot_unavailable(slot);
    }
    map_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

async fn load_barber(conn: &mut AsyncPgConnection, key: &SlotKey) -> Result<Contact, CommitError> {
    let row = users::table
        .filter(users::id.eq(key.barber_id.get()))
        .filter(users::role.eq(Role::Barber.as_str()))
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()?
        .ok_or_else(|| reject(BookingRepositoryError::barber_not_found(key.barber_id)))?;
    Ok(row.into_domain().map_err(malformed)?.contact())
}

async fn load_recipient(
    conn: &mut AsyncPgConnection,
    party: &BookingParty,
) -> Result<Contact, CommitError> {
    let customer_id = match party {
        BookingParty::Guest(guest) => return Ok(guest.contact()),
        BookingParty::Customer(id) => *id,
    };
    let row = users::table
        .find(customer_id.get())
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()?
        .ok_or_else(|| reject(BookingRepositoryError::customer_not_found(customer_id)))?;
    Ok(row.into_domain().map_err(malformed)?.contact())
}

/// Lock the exact slot tuple for the rest of the transaction.
async fn lock_slot(conn: &mut AsyncPgConnection, key: &SlotKey) -> Result<SlotRow, CommitError> {
    let row = schedule::table
        .filter(schedule::barber_id.eq(key.barber_id.get()))
        .filter(schedule::day.eq(key.day))
        .filter(schedule::start_time.eq(key.range.start()))
        .filter(schedule::end_time.eq(key.range.end()))
        .select(SlotRow::as_select())
        .for_update()
        .first(conn)
        .await
        .optional()?
        .ok_or_else(|| reject(BookingRepositoryError::slot_not_found(*key)))?;
    if row.status != SlotStatus::Available.as_str() {
        return Err(reject(BookingRepositoryError::slot_unavailable(*key)));
    }
    Ok(row)
}

async fn commit(
    conn: &mut AsyncPgConnection,
    plan: &BookingPlan,
) -> Result<BookingRecord, CommitError> {
    let request = &plan.request;
    let key = request.slot;

    let barber = load_barber(conn, &key).await?;
    let service = services::table
        .find(request.service_id.get())
        .select(ServiceRow::as_select())
        .first(conn)
        .await
        .optional()?
        .ok_or_else(|| reject(BookingRepositoryError::service_not_found(request.service_id)))?;
    let recipient = load_recipient(conn, &request.party).await?;
    let slot = lock_slot(conn, &key).await?;

    let guest = request.party.guest();
    let new_appointment = NewAppointmentRow {
        customer_id: request.party.customer_id().map(|id| id.get()),
        guest_first_name: guest.map(|g| g.first_name()),
        guest_last_name: guest.map(|g| g.last_name()),
        guest_email: guest.map(|g| g.email()),
        guest_phone: guest.map(|g| g.phone()),
        barber_id: key.barber_id.get(),
        service_id: service.id,
        schedule_id: slot.id,
        starts_at: key.starts_at(),
        ends_at: key.ends_at(),
        status: AppointmentStatus::Confirmed.as_str(),
        created_at: plan.booked_at,
    };
    let appointment_row: AppointmentRow = diesel::insert_into(appointments::table)
        .values(&new_appointment)
        .returning(AppointmentRow::as_returning())
        .get_result(conn)
        .await?;

    let flipped = diesel::update(
        schedule::table
            .filter(schedule::id.eq(slot.id))
            .filter(schedule::status.eq(SlotStatus::Available.as_str())),
    )
    .set(schedule::status.eq(SlotStatus::Unavailable.as_str()))
    .execute(conn)
    .await?;
    if flipped == 0 {
        return Err(reject(BookingRepositoryError::slot_unavailable(key)));
    }

    let message = booking_notification_message(&recipient.name, &service.name, &key);
    diesel::insert_into(notifications::table)
        .values(&NewNotificationRow {
            user_id: key.barber_id.get(),
            appointment_id: appointment_row.id,
            message: &message,
            kind: NotificationKind::BookingCreated.as_str(),
            created_at: plan.booked_at,
            status: NotificationStatus::Unread.as_str(),
        })
        .execute(conn)
        .await?;

    debug!(
        appointment_id = appointment_row.id,
        slot_id = slot.id,
        "appointment inserted and slot reserved"
    );
    Ok(BookingRecord {
        appointment: appointment_row.into_domain().map_err(malformed)?,
        slot: key,
        barber,
        recipient,
        service_name: service.name,
    })
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn commit_booking(
        &self,
        plan: &BookingPlan,
    ) -> Result<BookingRecord, BookingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingRepositoryError::connection))?;

        let result = conn
            .transaction::<_, CommitError, _>(|conn| {
                async move { commit(conn, plan).await }.scope_boxed()
            })
            .await;

        result.map_err(|err| match err {
            CommitError::Rejected(rejection) => rejection,
            CommitError::Database(error) => map_database_error(error, plan.request.slot),
        })
    }
}
