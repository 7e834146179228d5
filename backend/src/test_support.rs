//! Test utilities for the travel request crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or when the
//! `test-support` feature is enabled.

mod clock;
mod memory;

pub use clock::MutableClock;
pub use memory::{
    InMemoryTravelRequestRepository, InMemoryUserRepository, NotificationEvent,
    RecordingNotifier,
};
