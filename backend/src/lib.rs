//! Barbershop booking backend.
//!
//! Hexagonal layout: [`domain`] holds the model, ports, and services;
//! [`inbound`] adapts HTTP onto the driving ports; [`outbound`] implements the
//! driven ports over PostgreSQL, SMTP, and argon2; [`server`] wires them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
