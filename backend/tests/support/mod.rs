//! Helpers shared by the Postgres-backed integration suites.
//!
//! Each file under `tests/` compiles as its own crate and pulls this module in
//! with `mod support;`, so not every suite uses every helper.
#![allow(dead_code, reason = "each integration suite uses a different subset")]

pub mod cluster_skip;
pub mod embedded_postgres;
pub mod pg_embed;
pub mod seed;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::provision_template_database;
pub use pg_embed::shared_cluster;

/// Render a `postgres` error with its SQLSTATE and message.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}
