//! Behaviour tests for the booking flow over an in-memory shop.
//!
//! Scenarios drive the booking, availability, and notification services
//! exactly as the HTTP handlers do, with the mailer disabled.
//
// rstest-bdd generates guard variables with double underscores.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::sync::Arc;

use barbershop::domain::ports::{
    AvailabilityQuery, BookingCommand, DisabledBookingMailer, NotificationInbox,
};
use barbershop::domain::{
    AvailabilityService, BookingConfirmation, BookingParty, BookingRequest, BookingService,
    EmailDelivery, Error, ErrorCode, GuestContact, NotificationService, NotificationStatus,
    ServiceId, SlotKey, TimeRange, UserId,
};
use chrono::{NaiveDate, NaiveTime};
use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

mod doubles;

use doubles::InMemoryShop;

const BARBER: UserId = UserId::new(1);
const FIRST_CUSTOMER: UserId = UserId::new(2);
const SECOND_CUSTOMER: UserId = UserId::new(3);
const HAIRCUT: ServiceId = ServiceId::new(1);

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

fn slot_key(start: NaiveTime, end: NaiveTime) -> SlotKey {
    SlotKey {
        barber_id: BARBER,
        day: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
        range: TimeRange::new(start, end).expect("valid range"),
    }
}

struct BookingWorld {
    runtime: Runtime,
    shop: Arc<InMemoryShop>,
    bookings: BookingService<InMemoryShop, DisabledBookingMailer>,
    availability: AvailabilityService<InMemoryShop>,
    inbox: NotificationService<InMemoryShop>,
    last_booking: RefCell<Option<Result<BookingConfirmation, Error>>>,
    last_updated: RefCell<Option<usize>>,
}

impl BookingWorld {
    fn book(&self, key: SlotKey, party: BookingParty) {
        let request = BookingRequest {
            slot: key,
            service_id: HAIRCUT,
            party,
        };
        let outcome = self.runtime.block_on(self.bookings.create_booking(request));
        self.last_booking.replace(Some(outcome));
    }

    fn last_error_code(&self) -> ErrorCode {
        match self.last_booking.borrow().as_ref() {
            Some(Err(err)) => err.code(),
            other => panic!("expected a rejected booking, got {other:?}"),
        }
    }

    fn unread(&self) -> usize {
        self.runtime
            .block_on(self.inbox.list(BARBER))
            .expect("inbox loads")
            .iter()
            .filter(|n| n.status == NotificationStatus::Unread)
            .count()
    }
}

#[fixture]
fn world() -> BookingWorld {
    let shop = Arc::new(InMemoryShop::default());
    shop.add_person(BARBER, "Bo Barber", "bo@example.com");
    shop.add_person(FIRST_CUSTOMER, "Cy Customer", "cy@example.com");
    shop.add_person(SECOND_CUSTOMER, "Di Customer", "di@example.com");
    shop.add_service(HAIRCUT, "Haircut");
    BookingWorld {
        runtime: Runtime::new().expect("runtime"),
        bookings: BookingService::new(
            Arc::clone(&shop),
            Arc::new(DisabledBookingMailer),
            Arc::new(DefaultClock),
        ),
        availability: AvailabilityService::new(Arc::clone(&shop)),
        inbox: NotificationService::new(Arc::clone(&shop)),
        shop,
        last_booking: RefCell::new(None),
        last_updated: RefCell::new(None),
    }
}

#[given("a barber with an open slot on 2024-06-01 from 09:00 to 09:30")]
fn a_barber_with_an_open_slot(world: &BookingWorld) {
    world.shop.add_open_slot(slot_key(at(9, 0), at(9, 30)));
}

#[when("a customer books that slot")]
fn a_customer_books_that_slot(world: &BookingWorld) {
    world.book(
        slot_key(at(9, 0), at(9, 30)),
        BookingParty::Customer(FIRST_CUSTOMER),
    );
}

#[when("a second customer books that slot")]
fn a_second_customer_books_that_slot(world: &BookingWorld) {
    world.book(
        slot_key(at(9, 0), at(9, 30)),
        BookingParty::Customer(SECOND_CUSTOMER),
    );
}

#[when("a guest books that slot")]
fn a_guest_books_that_slot(world: &BookingWorld) {
    let guest =
        GuestContact::try_new("Ann", "Lee", "ann@example.com", "5550200").expect("valid guest");
    world.book(slot_key(at(9, 0), at(9, 30)), BookingParty::Guest(guest));
}

#[when("a customer books 10:00 to 10:30 on that day")]
fn a_customer_books_a_missing_slot(world: &BookingWorld) {
    world.book(
        slot_key(at(10, 0), at(10, 30)),
        BookingParty::Customer(FIRST_CUSTOMER),
    );
}

#[when("the barber marks every notification read")]
fn the_barber_marks_every_notification_read(world: &BookingWorld) {
    let ids = world
        .runtime
        .block_on(world.inbox.list(BARBER))
        .expect("inbox loads")
        .into_iter()
        .map(|n| n.id)
        .collect();
    let updated = world
        .runtime
        .block_on(world.inbox.mark_all_read(ids))
        .expect("update succeeds");
    world.last_updated.replace(Some(updated));
}

#[then("the booking is confirmed without email")]
fn the_booking_is_confirmed_without_email(world: &BookingWorld) {
    let last = world.last_booking.borrow();
    let confirmation = match last.as_ref() {
        Some(Ok(confirmation)) => confirmation,
        other => panic!("expected a confirmed booking, got {other:?}"),
    };
    assert_eq!(confirmation.email, EmailDelivery::Disabled);
    assert_eq!(confirmation.appointment.barber_id, BARBER);
    assert_eq!(
        confirmation.appointment.starts_at,
        slot_key(at(9, 0), at(9, 30)).starts_at()
    );
}

#[then("the booking is rejected as a conflict")]
fn the_booking_is_rejected_as_a_conflict(world: &BookingWorld) {
    assert_eq!(world.last_error_code(), ErrorCode::Conflict);
    assert_eq!(world.shop.appointment_count(), 1);
}

#[then("the booking is rejected as not found")]
fn the_booking_is_rejected_as_not_found(world: &BookingWorld) {
    assert_eq!(world.last_error_code(), ErrorCode::NotFound);
    assert_eq!(world.shop.appointment_count(), 0);
}

#[then("the barber has exactly one unread notification")]
fn the_barber_has_exactly_one_unread_notification(world: &BookingWorld) {
    assert_eq!(world.unread(), 1);
}

#[then("the barber has no unread notifications")]
fn the_barber_has_no_unread_notifications(world: &BookingWorld) {
    assert_eq!(world.unread(), 0);
}

#[then("one notification was updated")]
fn one_notification_was_updated(world: &BookingWorld) {
    assert_eq!(*world.last_updated.borrow(), Some(1));
}

#[then("the day lists no available slots")]
fn the_day_lists_no_available_slots(world: &BookingWorld) {
    let key = slot_key(at(9, 0), at(9, 30));
    let slots = world
        .runtime
        .block_on(world.availability.available_slots(BARBER, key.day))
        .expect("slots load");
    assert!(slots.is_empty());
    let dates = world
        .runtime
        .block_on(world.availability.available_dates(BARBER))
        .expect("dates load");
    assert!(dates.is_empty());
}

#[scenario(path = "tests/features/booking.feature")]
fn booking_scenarios(world: BookingWorld) {
    drop(world);
}
