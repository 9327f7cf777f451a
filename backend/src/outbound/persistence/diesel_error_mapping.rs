//! Diesel and pool error mapping shared by every repository.
//!
//! Repositories pass their port error constructors in, so each adapter keeps
//! its own error type without repeating the match on Diesel's error kinds.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(%error, "diesel operation failed"),
    }
}

/// Map Diesel errors into query/connection constructors.
///
/// Constraint violations that a repository wants to surface as domain
/// conflicts must be intercepted with [`violated_constraint`] first.
pub(crate) fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    log_diesel_error(&error);
    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        DieselError::BrokenTransactionManager => connection("transaction manager broken"),
        _ => query("database error"),
    }
}

/// Kind of integrity violation reported by PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    Unique,
    ForeignKey,
}

/// Name of the constraint `error` violated, when it is a unique or foreign
/// key violation.
pub(crate) fn violated_constraint(error: &DieselError) -> Option<(Violation, &str)> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    let violation = match kind {
        DatabaseErrorKind::UniqueViolation => Violation::Unique,
        DatabaseErrorKind::ForeignKeyViolation => Violation::ForeignKey,
        _ => return None,
    };
    Some((violation, info.constraint_name().unwrap_or_default()))
}

/// Convert rows into domain values, reporting the first malformed row.
pub(crate) fn collect_rows<R, T, E>(
    rows: Vec<R>,
    convert: impl Fn(R) -> Result<T, String>,
    query: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    rows.into_iter()
        .map(convert)
        .collect::<Result<Vec<_>, _>>()
        .map_err(query)
}
