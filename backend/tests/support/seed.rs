//! Direct SQL fixtures for rows no port can create (schedule slots) and
//! for the accounts a booking needs.
//!
//! Uses the blocking `postgres` client, so call these outside any Tokio
//! runtime.

use chrono::{NaiveDate, NaiveTime};
use postgres::{Client, NoTls};

use super::format_postgres_error;

/// Ids of the accounts and service seeded by [`seed_shop`].
#[derive(Debug, Clone, Copy)]
pub struct Shop {
    pub barber_id: i32,
    pub customer_id: i32,
    pub service_id: i32,
}

fn connect(url: &str) -> Result<Client, String> {
    Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))
}

fn insert_user(client: &mut Client, username: &str, role: &str, phone: &str) -> Result<i32, String> {
    let row = client
        .query_one(
            "INSERT INTO users (username, password_hash, first_name, last_name, role, email, phone)
             VALUES ($1, 'not-a-real-hash', $2, 'Tester', $3, $4, $5)
             RETURNING id",
            &[
                &username,
                &username,
                &role,
                &format!("{username}@example.com"),
                &phone,
            ],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

/// One barber offering one service, plus a customer.
pub fn seed_shop(url: &str) -> Result<Shop, String> {
    let mut client = connect(url)?;
    let barber_id = insert_user(&mut client, "bo", "barber", "5550100")?;
    let customer_id = insert_user(&mut client, "cy", "customer", "5550101")?;
    let service_id: i32 = client
        .query_one(
            "INSERT INTO services (name, description, price, duration_minutes)
             VALUES ('Haircut', 'Classic cut', 25.00, 30)
             RETURNING id",
            &[],
        )
        .map_err(|err| format_postgres_error(&err))?
        .get(0);
    client
        .execute(
            "INSERT INTO barber_services (barber_id, service_id) VALUES ($1, $2)",
            &[&barber_id, &service_id],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(Shop {
        barber_id,
        customer_id,
        service_id,
    })
}

/// Insert one schedule slot and return its id.
pub fn insert_slot(
    url: &str,
    barber_id: i32,
    day: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    status: &str,
) -> Result<i32, String> {
    let mut client = connect(url)?;
    let row = client
        .query_one(
            "INSERT INTO schedule (barber_id, day, start_time, end_time, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
            &[&barber_id, &day, &start, &end, &status],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

/// Count rows in `table`.
pub fn count_rows(url: &str, table: &str) -> Result<i64, String> {
    let mut client = connect(url)?;
    let row = client
        .query_one(&format!("SELECT COUNT(*) FROM {table}"), &[])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

/// Make every later insert into `notifications` raise, so a booking fails on
/// its last write after the slot is already locked and flipped.
pub fn reject_notification_inserts(url: &str) -> Result<(), String> {
    let mut client = connect(url)?;
    client
        .batch_execute(
            "CREATE FUNCTION reject_notification_insert() RETURNS trigger AS $$
             BEGIN
                 RAISE EXCEPTION 'notifications are read-only';
             END
             $$ LANGUAGE plpgsql;
             CREATE TRIGGER notifications_reject_insert
                 BEFORE INSERT ON notifications
                 FOR EACH ROW EXECUTE FUNCTION reject_notification_insert();",
        )
        .map_err(|err| format_postgres_error(&err))
}
