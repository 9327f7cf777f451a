//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs carry raw strings; these helpers turn them into typed values
//! and build `invalid_request` errors whose details name the offending field.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidDate,
    InvalidTime,
    InvalidValue,
    Conflicting,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidTime => "invalid_time",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::Conflicting => "conflicting_fields",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    ValidationError::new(field, format!("missing required field: {}", field.as_str()))
        .with_code(ErrorCode::MissingField)
}

/// Field present but semantically wrong; `message` is shown to the client.
pub(crate) fn invalid_field_error(field: FieldName, message: impl Into<String>) -> Error {
    ValidationError::new(field, message).with_code(ErrorCode::InvalidValue)
}

/// Two mutually exclusive fields were both given, or neither.
pub(crate) fn exclusive_fields_error(first: FieldName, second: FieldName) -> Error {
    let message = format!(
        "exactly one of {} or {} must be supplied",
        first.as_str(),
        second.as_str()
    );
    Error::invalid_request(message).with_details(json!({
        "fields": [first.as_str(), second.as_str()],
        "code": ErrorCode::Conflicting.as_str(),
    }))
}

/// Parse a calendar date given as `YYYY-MM-DD` or an RFC 2822 timestamp
/// such as `Sat, 01 Jun 2024 00:00:00 GMT`.
///
/// # Examples
/// ```ignore
/// let day = parse_date("Sat, 01 Jun 2024 00:00:00 GMT", FieldName::new("date"))?;
/// assert_eq!(day.to_string(), "2024-06-01");
/// ```
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    let raw = value.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc2822(raw).map(|stamp| stamp.date_naive()))
        .map_err(|_| {
            ValidationError::new(
                field,
                format!("{} must be a YYYY-MM-DD or RFC 2822 date", field.as_str()),
            )
            .with_value(ErrorCode::InvalidDate, value)
        })
}

pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value.map(|raw| parse_date(raw, field)).transpose()
}

/// Parse a wall-clock time given as `HH:MM` or `HH:MM:SS`.
pub(crate) fn parse_time(value: &str, field: FieldName) -> Result<NaiveTime, Error> {
    let raw = value.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| {
            ValidationError::new(
                field,
                format!("{} must be an HH:MM or HH:MM:SS time", field.as_str()),
            )
            .with_value(ErrorCode::InvalidTime, value)
        })
}
