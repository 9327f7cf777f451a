//! Integer identifiers for persisted entities.
//!
//! Each entity gets its own newtype so a slot id can never be passed where an
//! appointment id is expected.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw database identifier.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Raw database identifier.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user (customer, barber or admin).
    UserId
);
entity_id!(
    /// Identifier of a catalogue service.
    ServiceId
);
entity_id!(
    /// Identifier of a schedule slot.
    SlotId
);
entity_id!(
    /// Identifier of a booked appointment.
    AppointmentId
);
entity_id!(
    /// Identifier of a notification row.
    NotificationId
);
