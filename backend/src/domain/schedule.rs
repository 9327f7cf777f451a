//! Bookable schedule slots.
//!
//! A slot is one fixed interval on one barber's calendar. Its status is the
//! reservation flag: it flips from `Available` to `Unavailable` exactly once,
//! when a booking consumes it.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{SlotId, UserId};

/// Reservation state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotStatus {
    Available,
    Unavailable,
}

impl SlotStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for unrecognised slot status strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown slot status: {0}")]
pub struct ParseSlotStatusError(pub String);

impl FromStr for SlotStatus {
    type Err = ParseSlotStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(ParseSlotStatusError(s.to_owned())),
        }
    }
}

/// Error raised when a time range is empty or inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("start time {start} must be before end time {end}")]
pub struct InvalidTimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Half-open interval `[start, end)` within one day.
///
/// ## Invariants
/// - `start < end`.
///
/// # Examples
/// ```
/// use barbershop::domain::TimeRange;
/// use chrono::NaiveTime;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let half_past = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
/// assert!(TimeRange::new(nine, half_past).is_ok());
/// assert!(TimeRange::new(half_past, nine).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, InvalidTimeRange> {
        if start >= end {
            return Err(InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whole minutes covered by the range.
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Exact `(barber, day, start, end)` tuple a booking must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub barber_id: UserId,
    pub day: NaiveDate,
    pub range: TimeRange,
}

impl SlotKey {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.day.and_time(self.range.start())
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.day.and_time(self.range.end())
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "barber {} on {} {}-{}",
            self.barber_id,
            self.day,
            self.range.start().format("%H:%M"),
            self.range.end().format("%H:%M"),
        )
    }
}

/// Persisted schedule slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: SlotId,
    pub barber_id: UserId,
    pub day: NaiveDate,
    pub range: TimeRange,
    pub status: SlotStatus,
}

impl Slot {
    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }

    pub fn key(&self) -> SlotKey {
        SlotKey {
            barber_id: self.barber_id,
            day: self.day,
            range: self.range,
        }
    }
}
