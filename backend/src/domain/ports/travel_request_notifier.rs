//! Port for announcing travel request lifecycle events.
//!
//! Notifications are fire-and-forget: a failing adapter must not fail the
//! operation that triggered it, so the methods return nothing.

use crate::domain::{TravelRequest, TravelStatus, UserId};

/// Receives lifecycle events after they have been persisted.
#[cfg_attr(test, mockall::automock)]
pub trait TravelRequestNotifier: Send + Sync {
    /// A request was submitted.
    fn created(&self, request: &TravelRequest);

    /// A request moved from `previous` to its current status.
    fn status_changed(&self, request: &TravelRequest, previous: TravelStatus, actor: UserId);

    /// A request was cancelled via the cancel operation.
    fn cancelled(&self, request: &TravelRequest, actor: UserId);
}

/// Notifier that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpTravelRequestNotifier;

impl TravelRequestNotifier for NoOpTravelRequestNotifier {
    fn created(&self, _request: &TravelRequest) {}

    fn status_changed(&self, _request: &TravelRequest, _previous: TravelStatus, _actor: UserId) {}

    fn cancelled(&self, _request: &TravelRequest, _actor: UserId) {}
}
