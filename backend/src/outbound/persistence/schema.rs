//! Diesel table definitions mirroring `migrations/`.
//!
//! Status, role, and kind columns are `TEXT` with `CHECK` constraints; the
//! adapters translate them to domain enums.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int4,
        /// Unique login name (max 32 characters).
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        first_name -> Varchar,
        last_name -> Varchar,
        /// One of `guest`, `customer`, `barber`, `admin`.
        role -> Text,
        email -> Varchar,
        phone -> Varchar,
    }
}

diesel::table! {
    /// Service catalogue.
    services (id) {
        id -> Int4,
        name -> Varchar,
        description -> Text,
        price -> Numeric,
        duration_minutes -> Int4,
    }
}

diesel::table! {
    /// Barber to service links.
    barber_services (id) {
        id -> Int4,
        barber_id -> Int4,
        service_id -> Int4,
    }
}

diesel::table! {
    /// Bookable slots; `status` is the reservation flag.
    schedule (id) {
        id -> Int4,
        barber_id -> Int4,
        day -> Date,
        start_time -> Time,
        end_time -> Time,
        /// `available` or `unavailable`.
        status -> Text,
    }
}

diesel::table! {
    /// Booked appointments. Exactly one of `customer_id` and the guest
    /// columns is populated.
    appointments (id) {
        id -> Int4,
        customer_id -> Nullable<Int4>,
        guest_first_name -> Nullable<Varchar>,
        guest_last_name -> Nullable<Varchar>,
        guest_email -> Nullable<Varchar>,
        guest_phone -> Nullable<Varchar>,
        barber_id -> Int4,
        service_id -> Int4,
        /// Unique: one appointment per slot.
        schedule_id -> Int4,
        starts_at -> Timestamp,
        ends_at -> Timestamp,
        /// `confirmed`, `completed`, or `cancelled`.
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Per-user notification mailbox.
    notifications (id) {
        id -> Int4,
        user_id -> Int4,
        appointment_id -> Int4,
        message -> Varchar,
        /// Currently always `booking_created`.
        kind -> Text,
        created_at -> Timestamp,
        /// `unread` or `read`.
        status -> Text,
    }
}

diesel::joinable!(barber_services -> services (service_id));
diesel::joinable!(barber_services -> users (barber_id));
diesel::joinable!(schedule -> users (barber_id));
diesel::joinable!(notifications -> appointments (appointment_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    services,
    barber_services,
    schedule,
    appointments,
    notifications,
);
