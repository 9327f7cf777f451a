//! Per-user notification mailbox entries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use super::{AppointmentId, NotificationId, UserId};

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    BookingCreated,
}

impl NotificationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BookingCreated => "booking_created",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notification kind: {0}")]
pub struct ParseNotificationKindError(pub String);

impl FromStr for NotificationKind {
    type Err = ParseNotificationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking_created" => Ok(Self::BookingCreated),
            other => Err(ParseNotificationKindError(other.to_owned())),
        }
    }
}

/// Read marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationStatus {
    Unread,
    Read,
}

impl NotificationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notification status: {0}")]
pub struct ParseNotificationStatusError(pub String);

impl FromStr for NotificationStatus {
    type Err = ParseNotificationStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            _ => Err(ParseNotificationStatusError(s.to_owned())),
        }
    }
}

/// Stored notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub appointment_id: AppointmentId,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: NaiveDateTime,
    pub status: NotificationStatus,
}
