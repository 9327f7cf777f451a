//! Driving port for schedule availability reads.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Error, Slot, UserId};

/// Read-only availability views consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityQuery: Send + Sync {
    /// Days on which the barber has at least one open slot, ascending.
    async fn available_dates(&self, barber_id: UserId) -> Result<Vec<NaiveDate>, Error>;

    /// Open slots on `day`, ordered by start time.
    async fn available_slots(&self, barber_id: UserId, day: NaiveDate)
    -> Result<Vec<Slot>, Error>;
}
