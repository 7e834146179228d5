//! `TravelRequestNotifier` that emits structured log events.
//!
//! Events go to the `notifications` target so they can be routed or filtered
//! independently, e.g. `RUST_LOG=notifications=info`.

use tracing::info;

use crate::domain::ports::TravelRequestNotifier;
use crate::domain::{TravelRequest, TravelStatus, UserId};

/// Notifier writing one `tracing` event per lifecycle change.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTravelRequestNotifier;

impl TravelRequestNotifier for TracingTravelRequestNotifier {
    fn created(&self, request: &TravelRequest) {
        info!(
            target: "notifications",
            travel_request_id = %request.id(),
            requester = request.requester_name(),
            destination = request.destination(),
            departure_date = %request.departure_date(),
            return_date = %request.return_date(),
            "travel request submitted"
        );
    }

    fn status_changed(&self, request: &TravelRequest, previous: TravelStatus, actor: UserId) {
        info!(
            target: "notifications",
            travel_request_id = %request.id(),
            requester = request.requester_name(),
            from = %previous,
            to = %request.status(),
            actor_id = %actor,
            "travel request status changed"
        );
    }

    fn cancelled(&self, request: &TravelRequest, actor: UserId) {
        info!(
            target: "notifications",
            travel_request_id = %request.id(),
            requester = request.requester_name(),
            actor_id = %actor,
            "travel request cancelled"
        );
    }
}
