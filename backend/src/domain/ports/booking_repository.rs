//! Port for committing a booking as one unit of work.

use async_trait::async_trait;

use crate::domain::{BookingPlan, BookingRecord, ServiceId, SlotKey, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised while committing a booking.
    ///
    /// Every variant implies the transaction was rolled back.
    pub enum BookingRepositoryError {
        /// Barber id does not resolve to a user with the barber role.
        BarberNotFound { barber_id: UserId } => "barber {barber_id} not found",
        /// Service id does not resolve.
        ServiceNotFound { service_id: ServiceId } => "service {service_id} not found",
        /// Customer id does not resolve.
        CustomerNotFound { customer_id: UserId } => "customer {customer_id} not found",
        /// No slot matches the exact tuple.
        SlotNotFound { slot: SlotKey } => "no slot for {slot}",
        /// The slot exists but has already been reserved.
        SlotUnavailable { slot: SlotKey } => "slot for {slot} is no longer available",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
    }
}

/// Transactional booking writer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Reserve the slot, insert the appointment, flip the slot, and notify the
    /// barber, all or nothing.
    async fn commit_booking(
        &self,
        plan: &BookingPlan,
    ) -> Result<BookingRecord, BookingRepositoryError>;
}
