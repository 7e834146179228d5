//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the user and travel
//! request repository ports backed by PostgreSQL via Diesel, with async
//! support through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures map onto the port error
//!   enums with SQL details stripped.
//!
//! # Example
//!
//! ```ignore
//! use travel_requests::outbound::persistence::{
//!     DieselUserRepository, PoolConfig, RetryPolicy, TokioSleeper, prepare_database,
//! };
//!
//! let pool = prepare_database(
//!     PoolConfig::new("postgres://localhost/travel_requests"),
//!     RetryPolicy::new(10, std::time::Duration::from_secs(3)),
//!     &TokioSleeper,
//! )
//! .await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod bootstrap;
mod diesel_basic_error_mapping;
mod diesel_travel_request_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use bootstrap::{
    BootstrapError, MIGRATIONS, RetryPolicy, RetrySleeper, TokioSleeper, prepare_database,
    retry_with_delay,
};
pub use diesel_travel_request_repository::DieselTravelRequestRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
