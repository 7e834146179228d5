//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **security**: bcrypt password hashing and HS256 JWT tokens
//! - **notifications**: lifecycle events published as structured logs
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod notifications;
pub mod persistence;
pub mod security;
