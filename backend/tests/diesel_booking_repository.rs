//! Booking transaction and schedule reads against embedded PostgreSQL.
//!
//! Tests are synchronous and drive async repository calls through a runtime
//! owned by the test context. Seeding uses the blocking `postgres` client and
//! therefore always happens outside `block_on`.

use std::sync::Arc;

use barbershop::domain::ports::{
    BookingRepository, BookingRepositoryError, NotificationRepository, ScheduleRepository,
};
use barbershop::domain::{
    BookingParty, BookingPlan, BookingRequest, GuestContact, NotificationStatus, ServiceId,
    SlotKey, TimeRange, UserId,
};
use barbershop::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselNotificationRepository, DieselScheduleRepository,
    PoolConfig,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::seed::{Shop, count_rows, insert_slot, reject_notification_inserts, seed_shop};
use support::{handle_cluster_setup_failure, provision_template_database, shared_cluster};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

struct TestContext {
    runtime: Runtime,
    pool: DbPool,
    url: String,
    shop: Shop,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn bookings(&self) -> DieselBookingRepository {
        DieselBookingRepository::new(self.pool.clone())
    }

    fn schedule(&self) -> DieselScheduleRepository {
        DieselScheduleRepository::new(self.pool.clone())
    }

    fn notifications(&self) -> DieselNotificationRepository {
        DieselNotificationRepository::new(self.pool.clone())
    }

    fn barber(&self) -> UserId {
        UserId::new(self.shop.barber_id)
    }

    fn plan(&self, slot: SlotKey, party: BookingParty) -> BookingPlan {
        BookingPlan {
            request: BookingRequest {
                slot,
                service_id: ServiceId::new(self.shop.service_id),
                party,
            },
            booked_at: NaiveDateTime::new(day(2024, 5, 30), at(12, 0)),
        }
    }

    fn customer(&self) -> BookingParty {
        BookingParty::Customer(UserId::new(self.shop.customer_id))
    }
}

fn setup() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_template_database(cluster)?;
    let url = database.url().to_string();
    let shop = seed_shop(&url)?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(&url).with_max_size(4)))
        .map_err(|err| err.to_string())?;
    Ok(TestContext {
        runtime,
        pool,
        url,
        shop,
        _database: database,
    })
}

#[fixture]
fn world() -> Option<TestContext> {
    match setup() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn nine_o_clock(ctx: &TestContext) -> SlotKey {
    SlotKey {
        barber_id: ctx.barber(),
        day: day(2024, 6, 1),
        range: TimeRange::new(at(9, 0), at(9, 30)).expect("valid range"),
    }
}

#[rstest]
fn booking_commits_appointment_slot_flip_and_notification(world: Option<TestContext>) {
    let Some(ctx) = world else {
        eprintln!("SKIP-TEST-CLUSTER: booking_commits_appointment_slot_flip_and_notification");
        return;
    };
    let key = nine_o_clock(&ctx);
    insert_slot(&ctx.url, ctx.shop.barber_id, key.day, at(9, 0), at(9, 30), "available")
        .expect("seed slot");

    let record = ctx
        .runtime
        .block_on(ctx.bookings().commit_booking(&ctx.plan(key, ctx.customer())))
        .expect("booking commits");
    assert_eq!(record.appointment.starts_at, key.starts_at());
    assert_eq!(record.barber.email, "bo@example.com");

    let open = ctx
        .runtime
        .block_on(ctx.schedule().list_available_slots(&ctx.barber(), key.day))
        .expect("slots load");
    assert!(open.is_empty(), "slot should be flipped to unavailable");

    let inbox = ctx
        .runtime
        .block_on(ctx.notifications().list_for_user(&ctx.barber()))
        .expect("inbox loads");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].appointment_id, record.appointment.id);
    assert_eq!(inbox[0].status, NotificationStatus::Unread);
}

#[rstest]
fn concurrent_bookings_of_one_slot_yield_a_single_winner(world: Option<TestContext>) {
    let Some(ctx) = world else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_bookings_of_one_slot_yield_a_single_winner");
        return;
    };
    let key = nine_o_clock(&ctx);
    insert_slot(&ctx.url, ctx.shop.barber_id, key.day, at(9, 0), at(9, 30), "available")
        .expect("seed slot");

    let repo = Arc::new(ctx.bookings());
    let guest = GuestContact::try_new("Ann", "Lee", "ann@example.com", "5550200")
        .expect("valid guest");
    let first_plan = ctx.plan(key, ctx.customer());
    let second_plan = ctx.plan(key, BookingParty::Guest(guest));

    let (first, second) = ctx.runtime.block_on(async {
        let a = tokio::spawn({
            let repo = Arc::clone(&repo);
            async move { repo.commit_booking(&first_plan).await }
        });
        let b = tokio::spawn({
            let repo = Arc::clone(&repo);
            async move { repo.commit_booking(&second_plan).await }
        });
        (a.await.expect("task joins"), b.await.expect("task joins"))
    });

    let outcomes = [first, second];
    let winners = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(winners, 1, "exactly one booking wins: {outcomes:?}");
    assert!(outcomes.iter().any(|outcome| matches!(
        outcome,
        Err(BookingRepositoryError::SlotUnavailable { .. })
    )));

    assert_eq!(count_rows(&ctx.url, "appointments").expect("count"), 1);
    assert_eq!(count_rows(&ctx.url, "notifications").expect("count"), 1);
}

#[rstest]
#[case::unknown_service(None, Some(9_999))]
#[case::unknown_customer(Some(9_999), None)]
fn rejected_booking_leaves_no_trace(
    world: Option<TestContext>,
    #[case] customer_override: Option<i32>,
    #[case] service_override: Option<i32>,
) {
    let Some(ctx) = world else {
        eprintln!("SKIP-TEST-CLUSTER: rejected_booking_leaves_no_trace");
        return;
    };
    let key = nine_o_clock(&ctx);
    insert_slot(&ctx.url, ctx.shop.barber_id, key.day, at(9, 0), at(9, 30), "available")
        .expect("seed slot");

    let party = customer_override.map_or_else(
        || ctx.customer(),
        |id| BookingParty::Customer(UserId::new(id)),
    );
    let mut plan = ctx.plan(key, party);
    if let Some(id) = service_override {
        plan.request.service_id = ServiceId::new(id);
    }

    let err = ctx
        .runtime
        .block_on(ctx.bookings().commit_booking(&plan))
        .expect_err("booking is rejected");
    assert!(
        matches!(
            err,
            BookingRepositoryError::ServiceNotFound { .. }
                | BookingRepositoryError::CustomerNotFound { .. }
        ),
        "unexpected error: {err:?}"
    );

    let open = ctx
        .runtime
        .block_on(ctx.schedule().list_available_slots(&ctx.barber(), key.day))
        .expect("slots load");
    assert_eq!(open.len(), 1, "slot must remain available");
    assert_eq!(count_rows(&ctx.url, "appointments").expect("count"), 0);
    assert_eq!(count_rows(&ctx.url, "notifications").expect("count"), 0);
}

#[rstest]
fn failure_after_the_slot_flip_rolls_everything_back(world: Option<TestContext>) {
    let Some(ctx) = world else {
        eprintln!("SKIP-TEST-CLUSTER: failure_after_the_slot_flip_rolls_everything_back");
        return;
    };
    let key = nine_o_clock(&ctx);
    insert_slot(&ctx.url, ctx.shop.barber_id, key.day, at(9, 0), at(9, 30), "available")
        .expect("seed slot");
    reject_notification_inserts(&ctx.url).expect("install trigger");

    let err = ctx
        .runtime
        .block_on(ctx.bookings().commit_booking(&ctx.plan(key, ctx.customer())))
        .expect_err("notification insert fails");
    assert!(
        matches!(err, BookingRepositoryError::Query { .. }),
        "unexpected error: {err:?}"
    );

    let open = ctx
        .runtime
        .block_on(ctx.schedule().list_available_slots(&ctx.barber(), key.day))
        .expect("slots load");
    assert_eq!(open.len(), 1, "slot must remain available");
    assert_eq!(count_rows(&ctx.url, "appointments").expect("count"), 0);
    assert_eq!(count_rows(&ctx.url, "notifications").expect("count"), 0);
}

#[rstest]
fn booking_an_unknown_tuple_is_slot_not_found(world: Option<TestContext>) {
    let Some(ctx) = world else {
        eprintln!("SKIP-TEST-CLUSTER: booking_an_unknown_tuple_is_slot_not_found");
        return;
    };
    insert_slot(
        &ctx.url,
        ctx.shop.barber_id,
        day(2024, 6, 1),
        at(9, 0),
        at(10, 0),
        "available",
    )
    .expect("seed slot");

    // Same start, different end: the tuple must match exactly.
    let err = ctx
        .runtime
        .block_on(
            ctx.bookings()
                .commit_booking(&ctx.plan(nine_o_clock(&ctx), ctx.customer())),
        )
        .expect_err("no exact match");
    assert!(matches!(err, BookingRepositoryError::SlotNotFound { .. }));
}

#[rstest]
fn available_dates_skip_fully_booked_days(world: Option<TestContext>) {
    let Some(ctx) = world else {
        eprintln!("SKIP-TEST-CLUSTER: available_dates_skip_fully_booked_days");
        return;
    };
    let barber = ctx.shop.barber_id;
    insert_slot(&ctx.url, barber, day(2024, 6, 3), at(9, 0), at(9, 30), "available").expect("seed");
    insert_slot(&ctx.url, barber, day(2024, 6, 1), at(9, 0), at(9, 30), "available").expect("seed");
    insert_slot(&ctx.url, barber, day(2024, 6, 1), at(10, 0), at(10, 30), "available")
        .expect("seed");
    insert_slot(&ctx.url, barber, day(2024, 6, 2), at(9, 0), at(9, 30), "unavailable")
        .expect("seed");

    let dates = ctx
        .runtime
        .block_on(ctx.schedule().list_available_dates(&ctx.barber()))
        .expect("dates load");
    assert_eq!(dates, vec![day(2024, 6, 1), day(2024, 6, 3)]);

    let all = ctx
        .runtime
        .block_on(ctx.schedule().list_barber_slots(&ctx.barber()))
        .expect("slots load");
    assert_eq!(all.len(), 4);
    assert_eq!(all[1].range.start(), at(10, 0));

    let stranger = ctx
        .runtime
        .block_on(ctx.schedule().list_available_dates(&UserId::new(9_999)))
        .expect("unknown barber is not an error");
    assert!(stranger.is_empty());
}

#[rstest]
fn mark_all_read_counts_only_changed_rows(world: Option<TestContext>) {
    let Some(ctx) = world else {
        eprintln!("SKIP-TEST-CLUSTER: mark_all_read_counts_only_changed_rows");
        return;
    };
    let key = nine_o_clock(&ctx);
    insert_slot(&ctx.url, ctx.shop.barber_id, key.day, at(9, 0), at(9, 30), "available")
        .expect("seed slot");
    ctx.runtime
        .block_on(ctx.bookings().commit_booking(&ctx.plan(key, ctx.customer())))
        .expect("booking commits");

    let inbox = ctx.notifications();
    let ids = ctx
        .runtime
        .block_on(inbox.list_for_user(&ctx.barber()))
        .expect("inbox loads")
        .into_iter()
        .map(|notification| notification.id)
        .collect::<Vec<_>>();
    let mut mixed = ids.clone();
    mixed.push(barbershop::domain::NotificationId::new(9_999));

    let updated = ctx
        .runtime
        .block_on(inbox.mark_all_read(&mixed))
        .expect("update succeeds");
    assert_eq!(updated, 1);

    let again = ctx
        .runtime
        .block_on(inbox.mark_all_read(&mixed))
        .expect("update succeeds");
    assert_eq!(again, 0);

    let still_known = ctx
        .runtime
        .block_on(inbox.mark_read(&ids[0]))
        .expect("mark succeeds");
    assert!(still_known, "marking a read notification again is not an error");
}
