//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **mail**: SMTP delivery of booking emails
//! - **password**: Argon2 credential hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod mail;
pub mod password;
pub mod persistence;
