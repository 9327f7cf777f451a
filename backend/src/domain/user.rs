//! User directory model.

use std::fmt;
use std::str::FromStr;

use super::UserId;

/// Role attached to every account; gates directory mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Guest,
    Customer,
    Barber,
    Admin,
}

impl Role {
    /// Stable lowercase representation used on the wire and in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Customer => "customer",
            Self::Barber => "barber",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "customer" => Ok(Self::Customer),
            "barber" => Ok(Self::Barber),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(s.to_owned())),
        }
    }
}

/// Registered account as exposed to the rest of the domain.
///
/// Password hashes never leave the user repository through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub email: String,
    pub phone: String,
}

impl User {
    /// `"First Last"` as shown in emails and notifications.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Email recipient for this account.
    pub fn contact(&self) -> Contact {
        Contact {
            name: self.full_name(),
            email: self.email.clone(),
        }
    }
}

/// Stored account row including its credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Longest first or last name stored for users and guests.
pub const MAX_NAME_LEN: usize = 64;
/// Longest email address stored for users and guests.
pub const MAX_EMAIL_LEN: usize = 254;
/// Longest phone number stored for users and guests.
pub const MAX_PHONE_LEN: usize = 32;

/// Name and address used for outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

/// Account insert produced by registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub email: String,
    pub phone: String,
}

/// Optional profile field updates; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ProfileChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}
