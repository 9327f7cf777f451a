//! Catalogue services and barber–service links.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::{ServiceId, Slot, User, UserId};

/// Upper bound on a single service's duration (one working day).
pub const MAX_SERVICE_MINUTES: u32 = 12 * 60;

/// Longest service name the catalogue stores.
pub const MAX_SERVICE_NAME_LEN: usize = 64;

/// Largest price in cents; prices are stored with two decimal places.
pub const MAX_SERVICE_PRICE_CENTS: i64 = 99_999_999_99;

/// Failure to interpret a duration string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceDurationError {
    #[error("duration must not be empty")]
    Empty,
    #[error("unrecognised duration: {0}")]
    Unrecognised(String),
    #[error("duration must be between 1 and {max} minutes")]
    OutOfRange { max: u32 },
}

/// Length of a service in whole minutes.
///
/// Parses the free-text forms found in legacy catalogue data: `"45"`,
/// `"30 min"`, `"1 hour"`, `"1h 30m"`, `"1 hour 15 minutes"`.
///
/// # Examples
/// ```
/// use barbershop::domain::ServiceDuration;
///
/// let duration: ServiceDuration = "1 hour 15 min".parse().unwrap();
/// assert_eq!(duration.minutes(), 75);
/// assert_eq!(duration.to_string(), "1 hour 15 min");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceDuration(u32);

impl ServiceDuration {
    pub fn from_minutes(minutes: u32) -> Result<Self, ServiceDurationError> {
        if minutes == 0 || minutes > MAX_SERVICE_MINUTES {
            return Err(ServiceDurationError::OutOfRange {
                max: MAX_SERVICE_MINUTES,
            });
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

enum Unit {
    Minutes,
    Hours,
}

fn unit_for(word: &str) -> Option<Unit> {
    match word {
        "m" | "min" | "mins" | "minute" | "minutes" => Some(Unit::Minutes),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(Unit::Hours),
        _ => None,
    }
}

/// Split `"1h30m"`-style runs into alternating number and word tokens.
fn tokenise(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;
    for ch in raw.chars() {
        if ch.is_whitespace() || ch == ',' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        let is_digit = ch.is_ascii_digit();
        if !current.is_empty() && is_digit != in_digits {
            tokens.push(std::mem::take(&mut current));
        }
        in_digits = is_digit;
        current.push(ch);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

impl FromStr for ServiceDuration {
    type Err = ServiceDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase();
        if normalised.is_empty() {
            return Err(ServiceDurationError::Empty);
        }
        let unrecognised = || ServiceDurationError::Unrecognised(s.to_owned());

        let tokens = tokenise(&normalised);
        let mut total: u32 = 0;
        let mut iter = tokens.iter().peekable();
        while let Some(token) = iter.next() {
            let amount: u32 = token.parse().map_err(|_| unrecognised())?;
            let minutes = match iter.peek().and_then(|word| unit_for(word)) {
                Some(Unit::Hours) => {
                    iter.next();
                    amount.checked_mul(60).ok_or_else(unrecognised)?
                }
                Some(Unit::Minutes) => {
                    iter.next();
                    amount
                }
                // A bare trailing number means minutes.
                None if iter.peek().is_none() => amount,
                None => return Err(unrecognised()),
            };
            total = total.checked_add(minutes).ok_or_else(unrecognised)?;
        }
        Self::from_minutes(total)
    }
}

impl fmt::Display for ServiceDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 60;
        let minutes = self.0 % 60;
        match (hours, minutes) {
            (0, m) => write!(f, "{m} min"),
            (1, 0) => write!(f, "1 hour"),
            (h, 0) => write!(f, "{h} hours"),
            (1, m) => write!(f, "1 hour {m} min"),
            (h, m) => write!(f, "{h} hours {m} min"),
        }
    }
}

/// Catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub duration: ServiceDuration,
}

/// Insert payload for a new catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub duration: ServiceDuration,
}

/// Partial update of a catalogue entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration: Option<ServiceDuration>,
}

impl ServiceChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.duration.is_none()
    }
}

/// Many-to-many link recording that a barber offers a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarberServiceLink {
    pub barber_id: UserId,
    pub service_id: ServiceId,
}

/// A barber offering a service together with their open slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarberAvailability {
    pub barber: User,
    pub slots: Vec<Slot>,
}
